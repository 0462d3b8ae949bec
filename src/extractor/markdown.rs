use ego_tree::NodeRef;
use scraper::{ElementRef, Html, Node};
use url::Url;

use crate::extractor::tree::ContentNode;

/// Turns an HTML fragment into markdown-flavoured text.
pub trait MarkdownConverter {
    /// Relative `href`/`src` values are resolved against `base_url`.
    fn convert(&self, html_fragment: &str, base_url: &Url) -> String;
}

/// Default converter walking the parsed fragment with `scraper`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlMarkdown;

impl MarkdownConverter for HtmlMarkdown {
    fn convert(&self, html_fragment: &str, base_url: &Url) -> String {
        let fragment = Html::parse_fragment(html_fragment);
        let renderer = Renderer { base_url };
        tidy(&renderer.children(*fragment.root_element()))
    }
}

struct Renderer<'u> {
    base_url: &'u Url,
}

impl Renderer<'_> {
    fn children(&self, node: NodeRef<'_, Node>) -> String {
        node.children().map(|child| self.node(child)).collect()
    }

    fn node(&self, node: NodeRef<'_, Node>) -> String {
        match node.value() {
            Node::Text(text) => collapse_whitespace(text),
            Node::Element(_) => ElementRef::wrap(node)
                .map(|el| self.element(el))
                .unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn element(&self, el: ElementRef<'_>) -> String {
        let tag = el.value().name();
        match tag {
            "script" | "style" | "noscript" | "template" | "head" => String::new(),
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag[1..].parse::<usize>().unwrap_or(1);
                let text = self.inline(el);
                if text.is_empty() {
                    return String::new();
                }
                format!("\n\n{} {}\n\n", "#".repeat(level), text)
            }
            "br" => "\n".to_string(),
            "hr" => "\n\n---\n\n".to_string(),
            "pre" => code_block(el),
            "code" | "kbd" | "samp" | "tt" => {
                let code = collapse_whitespace(&el.text().collect::<String>());
                let code = code.trim();
                if code.is_empty() {
                    String::new()
                } else {
                    format!("`{code}`")
                }
            }
            "strong" | "b" => emphasis("**", self.inline(el)),
            "em" | "i" => emphasis("*", self.inline(el)),
            "a" => self.link(el),
            "img" => self.image(el),
            "ul" => self.list(el, false),
            "ol" => self.list(el, true),
            "table" => self.table(el),
            "dl" => self.definition_list(el),
            "blockquote" => {
                let inner = tidy(&self.children(*el));
                let quoted: Vec<String> = inner
                    .lines()
                    .map(|line| {
                        if line.is_empty() {
                            ">".to_string()
                        } else {
                            format!("> {line}")
                        }
                    })
                    .collect();
                block(&quoted.join("\n"))
            }
            "p" | "div" | "section" | "article" | "main" | "header" | "footer" | "figure"
            | "figcaption" | "details" | "summary" | "li" | "dt" | "dd" | "tr" => {
                block(self.children(*el).trim())
            }
            "td" | "th" => format!(" {} ", self.inline(el)),
            _ => self.children(*el),
        }
    }

    /// Children rendered on a single line.
    fn inline(&self, el: ElementRef<'_>) -> String {
        self.children(*el)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn resolve(&self, target: &str) -> String {
        self.base_url
            .join(target)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| target.to_string())
    }

    fn link(&self, el: ElementRef<'_>) -> String {
        let text = self.inline(el);
        let Some(href) = el.value().attr("href").map(str::trim) else {
            return text;
        };
        if text.is_empty() {
            return String::new();
        }
        if href.is_empty()
            || href.starts_with('#')
            || href.to_ascii_lowercase().starts_with("javascript:")
        {
            return text;
        }
        format!("[{text}]({})", self.resolve(href))
    }

    fn image(&self, el: ElementRef<'_>) -> String {
        let Some(src) = el.value().attr("src").map(str::trim) else {
            return String::new();
        };
        if src.is_empty() {
            return String::new();
        }
        let alt = el.value().attr("alt").unwrap_or("").trim();
        format!("![{alt}]({})", self.resolve(src))
    }

    fn list(&self, el: ElementRef<'_>, ordered: bool) -> String {
        let mut index = el
            .value()
            .attr("start")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(1);
        let mut lines = Vec::new();

        for item in el.child_elems().into_iter().filter(|c| c.is_tag("li")) {
            let body = tidy(&self.children(*item));
            if body.is_empty() {
                continue;
            }
            let marker = if ordered {
                format!("{index}. ")
            } else {
                "- ".to_string()
            };
            let indent = " ".repeat(marker.len());
            for (i, line) in body.lines().filter(|l| !l.trim().is_empty()).enumerate() {
                if i == 0 {
                    lines.push(format!("{marker}{line}"));
                } else {
                    lines.push(format!("{indent}{line}"));
                }
            }
            index = index.saturating_add(1);
        }

        if lines.is_empty() {
            return String::new();
        }
        block(&lines.join("\n"))
    }

    fn table(&self, el: ElementRef<'_>) -> String {
        let mut rows: Vec<Vec<String>> = el
            .descendant_elems()
            .into_iter()
            .filter(|row| row.is_tag("tr"))
            .map(|row| {
                row.child_elems()
                    .into_iter()
                    .filter(|cell| cell.is_tag("th") || cell.is_tag("td"))
                    .map(|cell| self.inline(cell).replace('|', "\\|"))
                    .collect::<Vec<_>>()
            })
            .filter(|cells| !cells.is_empty())
            .collect();

        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return String::new();
        }
        for row in &mut rows {
            row.resize(width, String::new());
        }

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(table_row(&rows[0]));
        lines.push(format!("|{}|", vec![" --- "; width].join("|")));
        lines.extend(rows[1..].iter().map(|row| table_row(row)));
        block(&lines.join("\n"))
    }

    fn definition_list(&self, el: ElementRef<'_>) -> String {
        let mut lines = Vec::new();
        for entry in el.descendant_elems() {
            if entry.is_tag("dt") {
                let term = self.inline(entry);
                if !term.is_empty() {
                    lines.push(format!("**{term}**"));
                }
            } else if entry.is_tag("dd") {
                let definition = self.inline(entry);
                if !definition.is_empty() {
                    lines.push(format!(": {definition}"));
                }
            }
        }
        if lines.is_empty() {
            return String::new();
        }
        block(&lines.join("\n"))
    }
}

fn code_block(el: ElementRef<'_>) -> String {
    let code: String = el.text().collect();
    let code = code.trim_matches('\n').trim_end();
    if code.trim().is_empty() {
        return String::new();
    }
    let language = std::iter::once(el)
        .chain(el.child_elems())
        .filter_map(|node| node.value().attr("class"))
        .flat_map(str::split_whitespace)
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .unwrap_or("");
    format!("\n\n```{language}\n{code}\n```\n\n")
}

fn table_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn emphasis(marker: &str, text: String) -> String {
    if text.is_empty() {
        text
    } else {
        format!("{marker}{text}{marker}")
    }
}

fn block(inner: &str) -> String {
    if inner.is_empty() {
        String::new()
    } else {
        format!("\n\n{inner}\n\n")
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

fn is_list_line(trimmed: &str) -> bool {
    if trimmed.starts_with("- ") {
        return true;
    }
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(". ")
}

/// Normalizes rendered output: trims lines outside code fences, keeps list
/// indentation, and collapses blank runs to a single empty line.
fn tidy(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            lines.push(line.trim_end());
            continue;
        }
        if in_fence {
            lines.push(line.trim_end());
            continue;
        }
        if trimmed.is_empty() {
            if lines.last().is_some_and(|last| !last.is_empty()) {
                lines.push("");
            }
            continue;
        }
        if is_list_line(trimmed) {
            lines.push(line.trim_end());
        } else {
            lines.push(trimmed);
        }
    }

    while lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}
