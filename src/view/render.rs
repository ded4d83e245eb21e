//! Plain-text rendering of the search view

use super::color::color_for_social_score;
use crate::network::SearchApi;
use crate::results::ResultItem;
use crate::search::SearchController;
use colored::Colorize;
use serde_json::Value;
use std::fmt::Write;

const SUMMARY_CHARS: usize = 320;

/// Rendering options
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Colour social scores (still subject to `colored`'s terminal detection)
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Corpus stats line and recommended queries
pub fn render_header<A: SearchApi>(ctl: &SearchController<A>) -> String {
    let mut out = String::new();

    if let Some(stats) = ctl.stats() {
        let mut parts = Vec::new();
        if let Some(total) = stats.get("total_papers").filter(|v| !v.is_null()) {
            parts.push(format!("{} papers indexed", display_value(total)));
        }
        if let Some(updated) = stats.get("latest_update").and_then(Value::as_str) {
            if !updated.is_empty() {
                parts.push(format!("updated {}", updated));
            }
        }
        if !parts.is_empty() {
            let _ = writeln!(out, "{}", parts.join(" · "));
        }
    }

    if !ctl.recommended_queries().is_empty() {
        let suggestions: Vec<String> = ctl
            .recommended_queries()
            .iter()
            .enumerate()
            .map(|(i, q)| format!("[{}] {}", i + 1, q))
            .collect();
        let _ = writeln!(out, "Try: {}", suggestions.join("  "));
    }

    out
}

/// The current page of results with a footer
pub fn render_page<A: SearchApi>(ctl: &SearchController<A>, opts: RenderOptions) -> String {
    let mut out = String::new();

    if !ctl.has_searched() {
        return out;
    }

    if ctl.is_loading() {
        let _ = writeln!(out, "Searching... {}s", ctl.formatted_elapsed());
        return out;
    }

    if ctl.results().is_empty() {
        let _ = writeln!(out, "No results found for \"{}\".", ctl.state().query);
        let _ = writeln!(out, "{}", render_footer(ctl));
        return out;
    }

    let offset = ctl.pagination().range().start;
    for (i, item) in ctl.paginated_results().into_iter().enumerate() {
        render_item(&mut out, offset + i + 1, item, opts);
        out.push('\n');
    }

    let _ = writeln!(out, "{}", render_footer(ctl));
    out
}

fn render_item(out: &mut String, number: usize, item: &ResultItem, opts: RenderOptions) {
    let _ = writeln!(out, "{:>3}. {}", number, item.title().unwrap_or("(untitled)"));

    if let Some(authors) = item.authors() {
        let _ = writeln!(out, "     {}", authors);
    }
    if let Some(url) = item.url() {
        let _ = writeln!(out, "     {}", url);
    }
    if let Some(summary) = item.summary() {
        let _ = writeln!(out, "     {}", truncate(summary, SUMMARY_CHARS));
    }

    let mut tail = Vec::new();
    if let Some(meta) = item.meta() {
        tail.push(meta.to_string());
    }
    if let Some(score) = item.social_score() {
        let label = format!("Social impact: {:.0}", score);
        match color_for_social_score(Some(score)).filter(|_| opts.color) {
            Some(color) => {
                let (r, g, b) = color.to_rgb();
                tail.push(label.truecolor(r, g, b).to_string());
            }
            None => tail.push(label),
        }
    }
    if !tail.is_empty() {
        let _ = writeln!(out, "     {}", tail.join(" · "));
    }
}

fn render_footer<A: SearchApi>(ctl: &SearchController<A>) -> String {
    let pagination = ctl.pagination();
    let mut parts = vec![
        format!(
            "Page {}/{}",
            pagination.current_page,
            pagination.total_pages().max(1)
        ),
        format!("{} results", pagination.total_items),
        format!("{}s", ctl.formatted_elapsed()),
        format!("sort: {}", ctl.state().sort_mode),
    ];
    if let Some(cache) = ctl.cache_info() {
        parts.push(format!("cache: {}", cache));
    }
    parts.join(" · ")
}

/// Full stats mapping, one key per line
pub fn render_stats<A: SearchApi>(ctl: &SearchController<A>) -> String {
    match ctl.stats() {
        Some(stats) if !stats.is_empty() => stats
            .iter()
            .map(|(k, v)| format!("{}: {}\n", k, display_value(v)))
            .collect(),
        _ => "Stats unavailable\n".to_string(),
    }
}

/// Current query options
pub fn render_options<A: SearchApi>(ctl: &SearchController<A>) -> String {
    let state = ctl.state();
    let flag = |on: bool| if on { "on" } else { "off" };
    format!(
        "deep: {} · query understanding: {} · smart rerank: {} · cache: {} · social impact: {}\nfields: {}\nsort: {}\n",
        flag(state.toggles.deep),
        flag(state.toggles.query_understanding),
        flag(state.toggles.smart_rerank),
        flag(state.toggles.use_cache),
        flag(state.toggles.social_impact),
        if state.indexing_fields.is_empty() {
            "(none)".to_string()
        } else {
            state.indexing_fields.join(", ")
        },
        state.sort_mode,
    )
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", text[..idx].trim_end()),
        None => text.to_string(),
    }
}
