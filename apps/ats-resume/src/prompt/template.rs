//! Closed-set named-slot templating.
//!
//! Syntax: `{slot_name}` is a placeholder, `{{` and `}}` are literal braces.
//! Only the four names in [`Slot`] are accepted. Anything else is a template
//! defect and is reported as a [`TemplateError`] rather than rendered.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("template references unknown slot '{{{name}}}' at byte {offset}")]
    UnknownSlot { name: String, offset: usize },

    #[error("unterminated placeholder starting at byte {offset}")]
    Unterminated { offset: usize },

    #[error("unmatched '}}' at byte {offset}")]
    UnmatchedClose { offset: usize },
}

/// The named substitution points a template may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    RawCareerText,
    JobDescriptionText,
    CandidateName,
    NormalizedHandle,
}

impl Slot {
    pub const ALL: [Slot; 4] = [
        Slot::RawCareerText,
        Slot::JobDescriptionText,
        Slot::CandidateName,
        Slot::NormalizedHandle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::RawCareerText => "raw_career_text",
            Slot::JobDescriptionText => "job_description_text",
            Slot::CandidateName => "candidate_name",
            Slot::NormalizedHandle => "normalized_handle",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }

    /// The placeholder as it is written in a template, e.g. `{candidate_name}`.
    pub fn token(self) -> String {
        format!("{{{}}}", self.name())
    }
}

/// Values bound to every slot for one render.
#[derive(Debug, Clone)]
pub struct SlotValues<'a> {
    pub raw_career_text: &'a str,
    pub job_description_text: &'a str,
    pub candidate_name: &'a str,
    pub normalized_handle: &'a str,
}

impl SlotValues<'_> {
    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::RawCareerText => self.raw_career_text,
            Slot::JobDescriptionText => self.job_description_text,
            Slot::CandidateName => self.candidate_name,
            Slot::NormalizedHandle => self.normalized_handle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Slot(Slot),
}

/// A parsed instruction template. Parsing validates every placeholder up
/// front, so binding values can never fail.
#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let segments = tokenize(source)?
            .into_iter()
            .map(|token| match token {
                Token::Text(text) => Ok(Segment::Text(text)),
                Token::Placeholder { name, offset } => Slot::from_name(name)
                    .map(Segment::Slot)
                    .ok_or_else(|| TemplateError::UnknownSlot {
                        name: name.to_string(),
                        offset,
                    }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Slots referenced by this template, in order of appearance (with repeats).
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Text(_) => None,
        })
    }

    /// Substitutes every slot and returns the result in template syntax:
    /// literal text and bound values both have their braces doubled.
    pub fn bind(&self, values: &SlotValues<'_>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(&escape(text)),
                Segment::Slot(slot) => out.push_str(&escape(values.get(*slot))),
            }
        }
        out
    }
}

/// Neutralizes placeholder metacharacters: `{` -> `{{`, `}` -> `}}`.
pub fn escape(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Resolves escaped template text to its final form. The slot set is empty
/// here, so any surviving `{name}` directive is rejected.
pub fn unescape(escaped: &str) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(escaped.len());
    for token in tokenize(escaped)? {
        match token {
            Token::Text(text) => out.push_str(&text),
            Token::Placeholder { name, offset } => {
                return Err(TemplateError::UnknownSlot {
                    name: name.to_string(),
                    offset,
                })
            }
        }
    }
    Ok(out)
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Text(String),
    Placeholder { name: &'a str, offset: usize },
}

fn tokenize(source: &str) -> Result<Vec<Token<'_>>, TemplateError> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut chars = source.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    text.push('{');
                    continue;
                }

                let start = offset + 1;
                let end = source[start..]
                    .find('}')
                    .map(|i| start + i)
                    .ok_or(TemplateError::Unterminated { offset })?;
                let name = &source[start..end];
                if name.contains('{') {
                    return Err(TemplateError::Unterminated { offset });
                }

                // Skip past the closing brace.
                for (i, _) in chars.by_ref() {
                    if i == end {
                        break;
                    }
                }

                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Placeholder { name, offset });
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(TemplateError::UnmatchedClose { offset });
                }
                text.push('}');
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    Ok(tokens)
}
