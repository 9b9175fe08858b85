//! Rule line parsing.
//!
//! A rule line has the form
//!
//! ```text
//! <pattern> [where (<check> <relative-pattern>)...] := <context>
//! ```
//!
//! where `<pattern>` is an absolute path (with `~` expanded and `.`/`..`
//! resolved), optionally suffixed with `/*` or `/**`, or the bare word
//! `where` for an unanchored rule. Everything before the first unescaped
//! `:=` is split into shell words; everything after it is the context
//! template, trimmed.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::landmark::{CheckRegistry, Landmark, LandmarkClause, Wildcard};
use crate::path::normalize::{expand_tilde, resolve_components};

const WHERE: &str = "where";

/// Parses one configuration line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// # Errors
///
/// Returns [`Error::InvalidRule`] for a malformed line and
/// [`Error::TooUnconstrained`] for a `/**` pattern without a where clause.
///
/// # Examples
///
/// ```
/// use contextual::config::parse_line;
/// use contextual::landmark::{CheckRegistry, Wildcard};
///
/// let registry = CheckRegistry::builtin();
/// let rule = parse_line("/home/* where -e .bashrc := HOME_DIR={0}", registry)
///     .unwrap()
///     .unwrap();
/// assert_eq!(rule.prefix(), ["home"]);
/// assert_eq!(rule.wildcard(), Wildcard::One);
///
/// assert!(parse_line("# comment", registry).unwrap().is_none());
/// assert!(parse_line("/home/** := x", registry).is_err());
/// ```
pub fn parse_line(line: &str, registry: &CheckRegistry) -> Result<Option<Landmark>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let invalid = |reason: String| Error::InvalidRule {
        line: line.to_string(),
        reason,
    };

    let (definition, context) =
        split_definition(line).ok_or_else(|| invalid("missing ':='".to_string()))?;
    let words = shell_words::split(definition)
        .map_err(|e| invalid(format!("cannot split into words: {e}")))?;
    let mut words = words.into_iter();

    let first = words
        .next()
        .ok_or_else(|| invalid("missing path pattern".to_string()))?;
    let (prefix, wildcard, has_clause) = if first == WHERE {
        (None, Wildcard::Recursive, true)
    } else {
        let (prefix, wildcard) = parse_pattern(&first).map_err(&invalid)?;
        let has_clause = match words.next() {
            None => false,
            Some(word) if word == WHERE => true,
            Some(word) => return Err(invalid(format!("expected 'where', found '{word}'"))),
        };
        (Some(prefix), wildcard, has_clause)
    };

    let clause = if has_clause {
        let mut clause = LandmarkClause::new();
        while let Some(token) = words.next() {
            let check = registry
                .get(&token)
                .ok_or_else(|| invalid(format!("unknown check '{token}'")))?;
            let relative = words
                .next()
                .ok_or_else(|| invalid(format!("missing pattern after '{token}'")))?;
            clause.push_cond(check.clone(), relative);
        }
        Some(clause)
    } else {
        None
    };

    let landmark = Landmark::new(prefix.as_deref(), wildcard, clause, context.trim())
        .map_err(|e| match e {
            Error::TooUnconstrained { .. } => Error::TooUnconstrained {
                line: line.to_string(),
            },
            other => other,
        })?;
    Ok(Some(landmark.with_source(line)))
}

/// Splits a line at the first `:=` not preceded by a backslash.
fn split_definition(line: &str) -> Option<(&str, &str)> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(":=") {
        let at = from + pos;
        if !line[..at].ends_with('\\') {
            return Some((&line[..at], &line[at + 2..]));
        }
        from = at + 2;
    }
    None
}

/// Turns a pattern word into an absolute prefix and its wildcard mode.
fn parse_pattern(word: &str) -> std::result::Result<(PathBuf, Wildcard), String> {
    let expanded = expand_tilde(Path::new(word)).map_err(|e| e.to_string())?;
    let expanded = expanded.to_string_lossy();
    let (base, wildcard) = if let Some(base) = expanded.strip_suffix("/**") {
        (base, Wildcard::Recursive)
    } else if let Some(base) = expanded.strip_suffix("/*") {
        (base, Wildcard::One)
    } else {
        (expanded.as_ref(), Wildcard::Exact)
    };
    let base = if base.is_empty() { "/" } else { base };
    if !Path::new(base).is_absolute() {
        return Err(format!("pattern '{word}' is not an absolute path"));
    }
    Ok((resolve_components(Path::new(base)), wildcard))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<Landmark>> {
        parse_line(line, CheckRegistry::builtin())
    }

    fn rule(line: &str) -> Landmark {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_and_comment_lines() {
        assert!(parse("").unwrap().is_none());
        assert!(parse("   ").unwrap().is_none());
        assert!(parse("#test").unwrap().is_none());
        assert!(parse("  # indented").unwrap().is_none());
    }

    #[test]
    fn test_unanchored_rule() {
        let l = rule("where -s .bashrc := zzz");
        assert!(l.prefix().is_empty());
        assert_eq!(l.wildcard(), Wildcard::Recursive);
        let cond = &l.clause().unwrap().conditions()[0];
        assert_eq!(cond.check().token(), "-s");
        assert_eq!(cond.relative().as_str(), ".bashrc");
        assert_eq!(l.context().as_str(), "zzz");
        assert_eq!(l.source(), "where -s .bashrc := zzz");
    }

    #[test]
    fn test_one_wildcard() {
        let l = rule("/home/* where -e .bashrc := zzz");
        assert_eq!(l.prefix(), ["home"]);
        assert_eq!(l.wildcard(), Wildcard::One);
        assert_eq!(l.clause().unwrap().conditions()[0].check().token(), "-e");
    }

    #[test]
    fn test_recursive_wildcard() {
        let l = rule("/home/** where -e .bashrc := zzz");
        assert_eq!(l.prefix(), ["home"]);
        assert_eq!(l.wildcard(), Wildcard::Recursive);
    }

    #[test]
    fn test_exact_with_quoted_pattern() {
        let l = rule("/home/pedronis where -f \"this one\" := zzz");
        assert_eq!(l.prefix(), ["home", "pedronis"]);
        assert_eq!(l.wildcard(), Wildcard::Exact);
        let cond = &l.clause().unwrap().conditions()[0];
        assert_eq!(cond.check().token(), "-f");
        assert_eq!(cond.relative().as_str(), "this one");
    }

    #[test]
    fn test_no_clause() {
        let l = rule("/home/pedronis := zzz");
        assert_eq!(l.prefix(), ["home", "pedronis"]);
        assert!(l.clause().is_none());

        let l = rule("/ := zzz");
        assert!(l.prefix().is_empty());
        assert_eq!(l.wildcard(), Wildcard::Exact);
        assert!(l.clause().is_none());
    }

    #[test]
    fn test_pattern_dots_resolved() {
        let l = rule("/srv/./www/../ftp/* := zzz");
        assert_eq!(l.prefix(), ["srv", "ftp"]);
    }

    #[test]
    fn test_root_one_wildcard() {
        let l = rule("/* := zzz");
        assert!(l.prefix().is_empty());
        assert_eq!(l.wildcard(), Wildcard::One);
    }

    #[test]
    fn test_tilde_pattern() {
        let home = home::home_dir().unwrap();
        let l = rule("~/src/* := zzz");
        assert_eq!(l.prefix(), crate::path::segs(&home.join("src")).as_slice());
    }

    #[test]
    fn test_too_unconstrained() {
        let err = parse("/home/** := zzz").unwrap_err();
        assert!(matches!(err, Error::TooUnconstrained { line } if line == "/home/** := zzz"));
    }

    #[test]
    fn test_context_is_remainder_after_first_separator() {
        let l = rule("/a := X=1 := still context ");
        assert_eq!(l.context().as_str(), "X=1 := still context");
    }

    #[test]
    fn test_escaped_separator_in_pattern() {
        let l = rule(r"/odd\:=dir := X=1");
        assert_eq!(l.prefix(), ["odd:=dir"]);
        assert_eq!(l.context().as_str(), "X=1");
    }

    #[test]
    fn test_void_context() {
        let l = rule("/tmp/** where -d .git :=");
        assert!(l.is_void());
    }

    #[test]
    fn test_invalid_lines() {
        for line in [
            "/home/pedronis",
            ":= zzz",
            "relative/dir := zzz",
            "/home where -q .bashrc := zzz",
            "/home where -e := zzz",
            "/home -e .bashrc := zzz",
            "/home where -e \"unbalanced := zzz",
            "~other/src := zzz",
        ] {
            let err = parse(line).unwrap_err();
            assert!(
                matches!(err, Error::InvalidRule { .. }),
                "{line}: unexpected {err:?}"
            );
        }
    }

    #[test]
    fn test_custom_registry() {
        let registry = CheckRegistry::with_builtins().with("-L", |p: &Path| p.is_symlink());
        let l = parse_line("where -L current := x", &registry)
            .unwrap()
            .unwrap();
        assert_eq!(l.clause().unwrap().conditions()[0].check().token(), "-L");
        assert!(parse("where -L current := x").is_err());
    }
}
