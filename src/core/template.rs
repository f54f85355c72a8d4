//! Placeholder scanning for section bodies.

/// A segment of a scanned section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// Raw text between `{` and `}`, untrimmed.
    Placeholder(String),
}

/// A section body split into literal text and `{...}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Scan `input` for placeholders.
    ///
    /// A placeholder is a `{` followed by one or more characters other than
    /// `}` and then a closing `}`. Scanning never fails: `{}`, a `{` with no
    /// closing brace and stray `}` all stay literal.
    pub fn parse(input: &str) -> Template {
        let mut segments = Vec::new();
        let mut literal_buf = String::new();
        let chars: Vec<char> = input.chars().collect();
        let len = chars.len();
        let mut i = 0;

        while i < len {
            if chars[i] == '{' {
                let start = i + 1;
                let close = chars[start..].iter().position(|&c| c == '}');
                match close {
                    Some(offset) if offset > 0 => {
                        if !literal_buf.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal_buf)));
                        }
                        let content: String = chars[start..start + offset].iter().collect();
                        segments.push(Segment::Placeholder(content));
                        i = start + offset + 1;
                    }
                    Some(_) => {
                        // `{}`
                        literal_buf.push('{');
                        i += 1;
                    }
                    None => {
                        literal_buf.extend(&chars[i..]);
                        break;
                    }
                }
            } else {
                literal_buf.push(chars[i]);
                i += 1;
            }
        }

        if !literal_buf.is_empty() {
            segments.push(Segment::Literal(literal_buf));
        }

        Template { segments }
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Rebuild the text, replacing each placeholder with `resolve`'s answer
    /// or, when it has none, with the placeholder as written.
    ///
    /// Bodies are Markdown, so substituted text is escaped to stay inline
    /// text: punctuation Markdown reacts to gets a backslash, and a number
    /// opening a line never turns the following `.` or `)` into a list
    /// marker.
    pub fn render<F>(&self, mut resolve: F) -> String
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::new();
        let mut number_opens_line = false;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    if number_opens_line && text.starts_with(|c: char| c == '.' || c == ')') {
                        out.push('\\');
                    }
                    out.push_str(text);
                    number_opens_line = false;
                }
                Segment::Placeholder(raw) => match resolve(raw) {
                    Some(value) => {
                        number_opens_line = at_line_start(&out)
                            && !value.is_empty()
                            && value.bytes().all(|b| b.is_ascii_digit());
                        push_escaped(&mut out, &value);
                    }
                    None => {
                        out.push('{');
                        out.push_str(raw);
                        out.push('}');
                        number_opens_line = false;
                    }
                },
            }
        }
        out
    }
}

fn at_line_start(out: &str) -> bool {
    out.rsplit('\n')
        .next()
        .map_or(true, |line| line.chars().all(|c| c == ' '))
}

fn push_escaped(out: &mut String, value: &str) {
    for c in value.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~' | '&') {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Lower-case, trim and collapse whitespace runs to one space.
pub fn normalize_key(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
