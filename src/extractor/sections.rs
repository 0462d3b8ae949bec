use crate::extractor::model::Section;

/// Splits markdown into sections at heading lines (`#` through `######`
/// followed by a space). Lines inside fenced code blocks never start a
/// section. Returns an empty vec when the text has no headings.
pub fn extract_sections(text: &str) -> Vec<Section<'_>> {
    let mut starts: Vec<(usize, usize, &str)> = Vec::new();
    let mut in_fence = false;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim_start().starts_with("```") {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some((level, heading)) = parse_heading(content) {
                starts.push((offset, level, heading));
            }
        }
        offset += line.len();
    }

    if starts.is_empty() {
        return Vec::new();
    }

    let mut sections = Vec::with_capacity(starts.len() + 1);
    if starts[0].0 > 0 {
        let lead = &text[..starts[0].0];
        sections.push(Section {
            heading: "",
            level: 0,
            body: lead,
            text: lead,
        });
    }

    for (i, &(start, level, heading)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(text.len(), |next| next.0);
        let span = &text[start..end];
        let body = span.find('\n').map_or("", |nl| &span[nl + 1..]);
        sections.push(Section {
            heading,
            level,
            body,
            text: span,
        });
    }

    sections
}

fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = line[level..].strip_prefix(' ')?;
    Some((level, rest.trim()))
}
