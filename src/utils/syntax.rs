use crate::ui::theme::Theme;
use ratatui::style::{Color as TuiColor, Style};
use ratatui::text::{Line, Span};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, VecDeque};
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, OnceLock};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const CACHE_CAPACITY: usize = 64;

type CacheKey = (String, u64);

/// Bounded FIFO cache of highlighted blocks; transcripts are re-rendered on
/// every frame, so the same block is highlighted many times.
struct HighlightCache {
    map: HashMap<CacheKey, Vec<Line<'static>>>,
    order: VecDeque<CacheKey>,
    cap: usize,
}

impl HighlightCache {
    fn new(cap: usize) -> Self {
        Self {
            map: HashMap::new(),
            order: VecDeque::new(),
            cap,
        }
    }

    fn get(&self, key: &CacheKey) -> Option<Vec<Line<'static>>> {
        self.map.get(key).cloned()
    }

    fn put(&mut self, key: CacheKey, lines: Vec<Line<'static>>) {
        if !self.map.contains_key(&key) {
            self.order.push_back(key.clone());
        }
        self.map.insert(key, lines);
        while self.map.len() > self.cap {
            match self.order.pop_front() {
                Some(old) => {
                    self.map.remove(&old);
                }
                None => break,
            }
        }
    }
}

static HIGHLIGHT_CACHE: OnceLock<Mutex<HighlightCache>> = OnceLock::new();
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn cache() -> &'static Mutex<HighlightCache> {
    HIGHLIGHT_CACHE.get_or_init(|| Mutex::new(HighlightCache::new(CACHE_CAPACITY)))
}

fn hash_code(lang: &str, code: &str, theme_sig: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    lang.hash(&mut hasher);
    code.hash(&mut hasher);
    theme_sig.hash(&mut hasher);
    hasher.finish()
}

fn is_dark_background(c: &TuiColor) -> bool {
    match c {
        TuiColor::Rgb(r, g, b) => {
            let luma = 0.2126 * (*r as f32) + 0.7152 * (*g as f32) + 0.0722 * (*b as f32);
            luma < 128.0
        }
        TuiColor::White => false,
        _ => true,
    }
}

/// Map common fence labels onto the names syntect knows them by.
pub fn normalize_lang_hint(s: &str) -> String {
    let t = s.trim().to_ascii_lowercase();
    match t.as_str() {
        "py" | "python3" => "python".into(),
        "sh" | "zsh" | "shell" | "console" => "bash".into(),
        "js" | "jsx" | "node" => "javascript".into(),
        "ts" | "tsx" => "typescript".into(),
        "yml" => "yaml".into(),
        "rs" => "rust".into(),
        "golang" => "go".into(),
        "h" => "c".into(),
        "cc" | "cxx" | "hpp" | "hxx" | "c++" => "cpp".into(),
        "kt" => "kotlin".into(),
        "rb" => "ruby".into(),
        "cs" | "c#" => "cs".into(),
        "htm" => "html".into(),
        other => other.into(),
    }
}

pub(crate) fn pick_syntect_theme_name(theme: &Theme) -> &'static str {
    if is_dark_background(&theme.background_color) {
        "base16-ocean.dark"
    } else {
        "InspiredGitHub"
    }
}

fn theme_signature(theme: &Theme, syntect_theme: &str) -> String {
    format!(
        "{}|{:?}|{:?}",
        syntect_theme, theme.md_codeblock_bg, theme.background_color
    )
}

/// Highlight `code` for the given fence label. Returns `None` when no
/// highlighting theme is available so callers can fall back to plain lines.
pub fn highlight_code_block(
    lang_hint: &str,
    code: &str,
    theme: &Theme,
) -> Option<Vec<Line<'static>>> {
    let syntaxes = SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines);
    let themes = THEME_SET.get_or_init(ThemeSet::load_defaults);

    let theme_name = pick_syntect_theme_name(theme);
    let syn_theme = themes
        .themes
        .get(theme_name)
        .or_else(|| themes.themes.get("base16-ocean.dark"))?;

    let lang = normalize_lang_hint(lang_hint);
    let key = (
        lang.clone(),
        hash_code(&lang, code, &theme_signature(theme, theme_name)),
    );
    if let Ok(guard) = cache().lock() {
        if let Some(lines) = guard.get(&key) {
            return Some(lines);
        }
    }

    let syntax = syntaxes
        .find_syntax_by_token(&lang)
        .unwrap_or_else(|| syntaxes.find_syntax_plain_text());
    let mut highlighter = HighlightLines::new(syntax, syn_theme);
    let bg = theme.md_codeblock_bg;

    let mut out: Vec<Line<'static>> = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, syntaxes).ok()?;
        let spans: Vec<Span<'static>> = ranges
            .into_iter()
            .filter_map(|(style, text)| {
                let frag = text.strip_suffix('\n').unwrap_or(text);
                let frag = frag.strip_suffix('\r').unwrap_or(frag);
                if frag.is_empty() {
                    return None;
                }
                let fg = style.foreground;
                let mut st = Style::default().fg(TuiColor::Rgb(fg.r, fg.g, fg.b));
                if let Some(bg) = bg {
                    st = st.bg(bg);
                }
                Some(Span::styled(frag.replace('\t', "    "), st))
            })
            .collect();
        out.push(Line::from(spans));
    }

    if let Ok(mut guard) = cache().lock() {
        guard.put(key, out.clone());
    }
    Some(out)
}
