//! Progress event classification
//!
//! Raw events arrive as JSON payloads keyed by the research phase that
//! produced them. Parsing is deliberately lenient: the producer is an
//! external, evolving service, so malformed payload fields fall back to
//! documented placeholder text instead of failing the event.

use crate::activity::ActivityEntry;
use serde_json::Value;

const TITLE_GENERATE_QUERIES: &str = "Generating Search Queries";
const TITLE_WEB_RESEARCH: &str = "Web Research";
const TITLE_REFLECTION: &str = "Reflection";
const TITLE_FINALIZE: &str = "Finalizing Answer";

const NO_QUERIES: &str = "No queries generated";
const NO_TITLE: &str = "No title";
const NO_SNIPPET: &str = "No snippet";
const NO_SOURCES_FOUND: &str = "No sources found.";
const SEARCH_SUFFICIENT: &str = "Search successful, generating final answer.";
const NO_FOLLOW_UPS: &str =
    "Need more information, but no specific follow-up queries provided or list is invalid.";
const COMPOSING_ANSWER: &str = "Composing final answer.";

/// How many gathered sources are rendered into a research entry.
const MAX_RENDERED_SOURCES: usize = 3;
/// Snippets longer than this are truncated to the first 97 chars plus "...".
const MAX_SNIPPET_CHARS: usize = 100;

/// One raw progress event, parsed into its phase shape.
///
/// Shapes are mutually exclusive by construction of the producer; when a
/// payload carries more than one phase key anyway, the first match in
/// declaration order wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Initial query generation. `None` when the query list was missing or
    /// not a sequence.
    GenerateQuery { query_list: Option<Vec<String>> },
    /// Web research step with zero or more gathered sources.
    WebResearch { sources: Vec<Source> },
    /// Reflection on whether the gathered material suffices.
    Reflection {
        is_sufficient: bool,
        /// `None` when the follow-up list was missing or not a sequence.
        follow_up_queries: Option<Vec<String>>,
    },
    /// Terminal phase marker: the agent has begun composing its final answer.
    FinalizeAnswer,
    /// Unrecognized shape; carries no user-visible content.
    Unknown,
}

/// A gathered source with optional metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    pub title: Option<String>,
    pub snippet: Option<String>,
}

impl ProgressEvent {
    /// Parse a raw event payload. Total: never fails, unknown shapes map to
    /// [`ProgressEvent::Unknown`].
    pub fn from_value(raw: &Value) -> Self {
        if let Some(payload) = shape(raw, "generate_query") {
            return ProgressEvent::GenerateQuery {
                query_list: lenient_string_list(payload.get("query_list")),
            };
        }
        if let Some(payload) = shape(raw, "web_research") {
            let sources = payload
                .get("sources_gathered")
                .and_then(Value::as_array)
                .map(|items| items.iter().map(Source::from_value).collect())
                .unwrap_or_default();
            return ProgressEvent::WebResearch { sources };
        }
        if let Some(payload) = shape(raw, "reflection") {
            return ProgressEvent::Reflection {
                is_sufficient: payload
                    .get("is_sufficient")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                follow_up_queries: lenient_string_list(payload.get("follow_up_queries")),
            };
        }
        if shape(raw, "finalize_answer").is_some() {
            return ProgressEvent::FinalizeAnswer;
        }
        ProgressEvent::Unknown
    }
}

impl Source {
    fn from_value(value: &Value) -> Self {
        Self {
            title: value
                .get("title")
                .and_then(Value::as_str)
                .map(str::to_string),
            snippet: value
                .get("snippet")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

/// A phase key matches when it is present and non-null.
fn shape<'a>(raw: &'a Value, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

/// Coerce a payload field to a list of strings, or `None` when it is missing
/// or not a sequence. Non-string items render via their JSON representation.
fn lenient_string_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = value?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item.as_str() {
                Some(s) => s.to_string(),
                None => item.to_string(),
            })
            .collect(),
    )
}

/// Result of classifying one progress event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// The timeline entry this event produced, if it carries user-visible
    /// content.
    pub entry: Option<ActivityEntry>,
    /// Whether this event is the terminal phase marker for the turn.
    pub terminal: bool,
}

impl Classification {
    fn silent() -> Self {
        Self {
            entry: None,
            terminal: false,
        }
    }

    fn entry(entry: ActivityEntry) -> Self {
        Self {
            entry: Some(entry),
            terminal: false,
        }
    }
}

/// Map one progress event to at most one timeline entry, and report whether
/// it marks the terminal phase.
pub fn classify(event: &ProgressEvent) -> Classification {
    match event {
        ProgressEvent::GenerateQuery { query_list } => {
            let data = match query_list {
                Some(queries) if !queries.is_empty() => queries.join(", "),
                _ => NO_QUERIES.to_string(),
            };
            Classification::entry(ActivityEntry::new(TITLE_GENERATE_QUERIES, data))
        }

        ProgressEvent::WebResearch { sources } => {
            let mut data = format!("Gathered {} sources.", sources.len());
            if sources.is_empty() {
                data.push(' ');
                data.push_str(NO_SOURCES_FOUND);
            } else {
                let lines: Vec<String> = sources
                    .iter()
                    .take(MAX_RENDERED_SOURCES)
                    .enumerate()
                    .map(|(index, source)| render_source_line(index, source))
                    .collect();
                data.push_str(" Top sources:\n");
                data.push_str(&lines.join("\n"));
            }
            Classification::entry(ActivityEntry::new(TITLE_WEB_RESEARCH, data))
        }

        ProgressEvent::Reflection {
            is_sufficient,
            follow_up_queries,
        } => {
            let data = if *is_sufficient {
                SEARCH_SUFFICIENT.to_string()
            } else {
                match follow_up_queries {
                    Some(queries) if !queries.is_empty() => {
                        format!("Need more information, searching for {}", queries.join(", "))
                    }
                    _ => NO_FOLLOW_UPS.to_string(),
                }
            };
            Classification::entry(ActivityEntry::new(TITLE_REFLECTION, data))
        }

        ProgressEvent::FinalizeAnswer => Classification {
            entry: Some(ActivityEntry::new(TITLE_FINALIZE, COMPOSING_ANSWER)),
            terminal: true,
        },

        ProgressEvent::Unknown => Classification::silent(),
    }
}

fn render_source_line(index: usize, source: &Source) -> String {
    let title = source.title.as_deref().unwrap_or(NO_TITLE);
    let snippet = source.snippet.as_deref().unwrap_or(NO_SNIPPET);
    let short_snippet = if snippet.chars().count() > MAX_SNIPPET_CHARS {
        let truncated: String = snippet.chars().take(MAX_SNIPPET_CHARS - 3).collect();
        format!("{truncated}...")
    } else {
        snippet.to_string()
    };
    format!("Source {}: {} - {}", index + 1, title, short_snippet)
}
