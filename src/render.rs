use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
    #[error("template {0} failed: {1}")]
    Template(String, String),
}

/// Turns a template name and its data into an HTML document.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError>;
}

pub const TEMPLATES: &[&str] = &[
    "index",
    "dramabox",
    "search",
    "search-db",
    "play",
    "play-db",
    "error",
];

/// Minimal renderer: an HTML document carrying the page title and the full
/// page data as embedded JSON, for a client-side front end to pick up.
#[derive(Debug, Default)]
pub struct ShellRenderer;

impl Renderer for ShellRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String, RenderError> {
        if !TEMPLATES.contains(&template) {
            return Err(RenderError::UnknownTemplate(template.to_string()));
        }

        let title = context.get("title").and_then(Value::as_str).unwrap_or("Dracin");
        let nav = context.get("activeNav").and_then(Value::as_str).unwrap_or("");
        let data = serde_json::to_string(context)
            .map_err(|e| RenderError::Template(template.to_string(), e.to_string()))?;

        Ok(format!(
            "<!DOCTYPE html>\n<html lang=\"id\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{}</title>\n</head>\n<body data-template=\"{}\" data-nav=\"{}\">\n\
             <script type=\"application/json\" id=\"page-data\">{}</script>\n</body>\n</html>\n",
            escape_html(title),
            escape_html(template),
            escape_html(nav),
            escape_script(&data),
        ))
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// JSON inside <script> only has to avoid closing the element early.
fn escape_script(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "\\u003c!--")
}
