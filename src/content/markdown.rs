//! Markdown rendering for entry bodies

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// A heading found while rendering, for building a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub text: String,
    pub anchor: String,
}

/// Rendered body plus its outline
#[derive(Debug, Clone, Serialize)]
pub struct Rendered {
    pub html: String,
    pub headings: Vec<Heading>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::from_config(&HighlightConfig::default())
    }

    pub fn from_config(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        self.render_with_outline(markdown).html
    }

    /// Render markdown to HTML, giving every heading an `id` anchor
    pub fn render_with_outline(&self, markdown: &str) -> Rendered {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Vec::new();
        let mut headings = Vec::new();

        // (language, collected source) while inside a code block
        let mut code_block: Option<(Option<String>, String)> = None;
        // (index of the Start event, level, collected text) while inside a heading
        let mut heading: Option<(usize, HeadingLevel, String)> = None;

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                        _ => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, source)) = code_block.take() {
                        let highlighted = self.highlight_code(&source, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                    }
                }
                Event::Text(text) if code_block.is_some() => {
                    if let Some((_, source)) = code_block.as_mut() {
                        source.push_str(&text);
                    }
                }
                Event::Start(Tag::Heading { level, .. }) => {
                    heading = Some((events.len(), level, String::new()));
                    events.push(event);
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((start, level, text)) = heading.take() {
                        let anchor = unique_anchor(&text, &headings);
                        events[start] = Event::Start(Tag::Heading {
                            level,
                            id: Some(CowStr::from(anchor.clone())),
                            classes: Vec::new(),
                            attrs: Vec::new(),
                        });
                        headings.push(Heading {
                            level: level as u8,
                            text,
                            anchor,
                        });
                    }
                    events.push(event);
                }
                Event::Text(text) if heading.is_some() => {
                    if let Some((_, _, collected)) = heading.as_mut() {
                        collected.push_str(&text);
                    }
                    events.push(Event::Text(text));
                }
                Event::Code(code) if heading.is_some() => {
                    if let Some((_, _, collected)) = heading.as_mut() {
                        collected.push_str(&code);
                    }
                    events.push(Event::Code(code));
                }
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Rendered {
            html: html_output,
            headings,
        }
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let highlighted = self
            .theme()
            .and_then(|theme| highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok());

        // The fence info string ends up inside a class attribute
        let class = html_escape(lang);

        match highlighted {
            Some(highlighted) if self.line_numbers => add_line_numbers(&highlighted, &class),
            Some(highlighted) => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class, highlighted
            ),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class,
                html_escape(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap highlighted code in a gutter table
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code"><pre>{}</pre></td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Slug for a heading, suffixed when an earlier heading already used it
fn unique_anchor(text: &str, seen: &[Heading]) -> String {
    let base = match slug::slugify(text) {
        s if s.is_empty() => "section".to_string(),
        s => s,
    };

    let mut anchor = base.clone();
    let mut n = 1;
    while seen.iter().any(|h| h.anchor == anchor) {
        anchor = format!("{}-{}", base, n);
        n += 1;
    }
    anchor
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
