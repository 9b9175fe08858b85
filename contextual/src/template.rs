//! Placeholder templates for condition patterns and context strings.
//!
//! Templates use a small subset of brace formatting:
//!
//! - `{0}`, `{1}`, ... select a matched path by position
//! - `{}` selects the next position automatically
//! - `{ctx_dir}` and `{ctxdir}` are aliases for `{0}`, the matched anchor
//! - `{{` and `}}` produce literal braces
//!
//! Referencing a position or name that is not bound is reported as
//! [`TemplateError::Unbound`], distinct from a syntactically
//! [`TemplateError::Malformed`] template, so callers can report it per rule.
//!
//! # Examples
//!
//! ```
//! use contextual::Template;
//!
//! let template = Template::new("cd {ctx_dir} && export SRC={1}");
//! let rendered = template.render(&["/work/proj", "/work/proj/src"]).unwrap();
//! assert_eq!(rendered, "cd /work/proj && export SRC=/work/proj/src");
//! ```

use std::fmt;

use thiserror::Error;

/// Names accepted as aliases for the anchor placeholder `{0}`.
pub const ANCHOR_ALIASES: [&str; 2] = ["ctx_dir", "ctxdir"];

/// Failure to render a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// The template references a position or name that is not bound.
    #[error("{template:?} has unbound/unknown placeholder")]
    Unbound {
        /// The template source.
        template: String,
        /// The placeholder as written between the braces.
        placeholder: String,
    },

    /// The template is not well formed.
    #[error("{template:?} is malformed: {reason}")]
    Malformed {
        /// The template source.
        template: String,
        /// What is wrong with it.
        reason: String,
    },
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Numbering {
    Automatic,
    Manual,
}

/// A template string with placeholders, kept unrendered until match time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    source: String,
}

impl Template {
    /// Creates a template from its source text.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }

    /// Returns the unrendered source text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the template has no text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Renders the template with positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Unbound`] when a placeholder is out of range
    /// or unknown, and [`TemplateError::Malformed`] for syntax problems.
    ///
    /// # Examples
    ///
    /// ```
    /// use contextual::{Template, TemplateError};
    ///
    /// let template = Template::new("{0}/{2}");
    /// let err = template.render(&["/a", "/a/b"]).unwrap_err();
    /// assert!(matches!(err, TemplateError::Unbound { .. }));
    /// ```
    pub fn render<S: AsRef<str>>(&self, args: &[S]) -> Result<String, TemplateError> {
        self.render_with(args, str::to_string)
    }

    /// Renders the template, passing every substituted value through
    /// `escape` first. Literal text is copied as is.
    ///
    /// # Errors
    ///
    /// Same as [`Template::render`].
    pub fn render_with<S, F>(&self, args: &[S], escape: F) -> Result<String, TemplateError>
    where
        S: AsRef<str>,
        F: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(self.source.len());
        let mut chars = self.source.chars().peekable();
        let mut numbering = None;
        let mut next_auto = 0usize;

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        out.push('{');
                        continue;
                    }
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => return Err(self.malformed("unexpected '{' in field name")),
                            Some(c) => field.push(c),
                            None => return Err(self.malformed("single '{' encountered")),
                        }
                    }
                    let index = self.resolve_field(&field, &mut numbering, &mut next_auto)?;
                    let value = args.get(index).ok_or_else(|| self.unbound(&field))?;
                    out.push_str(&escape(value.as_ref()));
                }
                '}' => {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        out.push('}');
                    } else {
                        return Err(self.malformed("single '}' encountered"));
                    }
                }
                c => out.push(c),
            }
        }

        Ok(out)
    }

    fn resolve_field(
        &self,
        field: &str,
        numbering: &mut Option<Numbering>,
        next_auto: &mut usize,
    ) -> Result<usize, TemplateError> {
        if field.contains(['!', ':', '.', '[']) {
            return Err(self.malformed("conversions and format specs are not supported"));
        }
        if field.is_empty() {
            if *numbering == Some(Numbering::Manual) {
                return Err(
                    self.malformed("cannot switch from manual field numbering to automatic")
                );
            }
            *numbering = Some(Numbering::Automatic);
            let index = *next_auto;
            *next_auto += 1;
            return Ok(index);
        }
        if field.bytes().all(|b| b.is_ascii_digit()) {
            if *numbering == Some(Numbering::Automatic) {
                return Err(
                    self.malformed("cannot switch from automatic field numbering to manual")
                );
            }
            *numbering = Some(Numbering::Manual);
            return field.parse().map_err(|_| self.unbound(field));
        }
        if ANCHOR_ALIASES.contains(&field) {
            return Ok(0);
        }
        Err(self.unbound(field))
    }

    fn unbound(&self, placeholder: &str) -> TemplateError {
        TemplateError::Unbound {
            template: self.source.clone(),
            placeholder: placeholder.to_string(),
        }
    }

    fn malformed(&self, reason: &str) -> TemplateError {
        TemplateError::Malformed {
            template: self.source.clone(),
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}
