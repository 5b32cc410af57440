use pagecraft_document::{
    BannerContent, DocumentError, InfoContent, PageDocument, PageVisitor, Section, SectionKey,
    Service,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Cannot render document: {0}")]
    Document(#[from] DocumentError),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

/// Which surface the page is rendered for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Detached preview of the unsaved draft
    #[default]
    Preview,
    /// Read-only public page
    Public,
}

/// Options for HTML compilation
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub mode: RenderMode,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// `<title>`; defaults to "Preview" or the practitioner's name
    pub page_title: Option<String>,
    /// Embed the default stylesheet in `<head>`
    pub include_stylesheet: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Preview,
            pretty: true,
            indent: "  ".to_string(),
            page_title: None,
            include_stylesheet: true,
        }
    }
}

const STYLESHEET: &[&str] = &[
    "body { margin: 0; font-family: system-ui, sans-serif; background: #f9fafb; color: #111827; }",
    ".page { max-width: 80rem; margin: 0 auto; padding: 1.5rem 2rem; }",
    ".preview-notice { background: #fef3c7; color: #92400e; padding: 0.5rem 1rem; border-radius: 0.5rem; margin-bottom: 1.5rem; }",
    ".info { background: #fff; border-radius: 0.5rem; box-shadow: 0 10px 15px rgba(0,0,0,0.1); padding: 1.5rem; margin-bottom: 1.5rem; }",
    ".info h2 { font-size: 1.5rem; margin: 0 0 1rem; }",
    ".info p { color: #4b5563; margin: 0.5rem 0; }",
    ".banner { background: #eff6ff; border-left: 4px solid #3b82f6; padding: 1rem; border-radius: 0.5rem; margin-bottom: 1.5rem; }",
    ".banner p { color: #1d4ed8; margin: 0; }",
    ".services { display: grid; grid-template-columns: repeat(auto-fill, minmax(16rem, 1fr)); gap: 1.5rem; }",
    ".service { background: #fff; padding: 1.5rem; border-radius: 0.5rem; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }",
    ".service h3 { font-size: 1.125rem; margin: 0 0 0.5rem; }",
    ".service p { font-size: 0.875rem; color: #6b7280; margin: 0; }",
];

struct Context {
    options: CompileOptions,
    depth: usize,
    buffer: String,
}

impl Context {
    fn new(options: CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Renders the visible parts of a page into a [`Context`]
///
/// Visibility and order come from the shared [`PageVisitor`] traversal, so the
/// preview and the public page always show the same items.
struct HtmlRenderer {
    ctx: Context,
}

impl PageVisitor for HtmlRenderer {
    fn visit_info(&mut self, _section: &Section, info: &InfoContent) {
        let ctx = &mut self.ctx;
        ctx.add_line("<div class=\"info\" data-section=\"info\">");
        ctx.indent();
        ctx.add_line(&format!("<h2>{}</h2>", escape_html(&info.name)));
        for (class, value) in [
            ("phone", &info.phone),
            ("email", &info.email),
            ("address", &info.address),
        ] {
            if !value.is_empty() {
                ctx.add_line(&format!(
                    "<p class=\"{}\">{}</p>",
                    class,
                    escape_html(value)
                ));
            }
        }
        ctx.dedent();
        ctx.add_line("</div>");
    }

    fn visit_banner(&mut self, _section: &Section, banner: &BannerContent) {
        // Nothing to announce
        if banner.text.is_empty() {
            return;
        }

        let ctx = &mut self.ctx;
        ctx.add_line("<div class=\"banner\" data-section=\"banner\">");
        ctx.indent();
        ctx.add_line(&format!("<p>{}</p>", escape_html(&banner.text)));
        ctx.dedent();
        ctx.add_line("</div>");
    }

    fn visit_services(&mut self, doc: &PageDocument, _section: &Section) {
        self.ctx
            .add_line("<div class=\"services\" data-section=\"services\">");
        self.ctx.indent();
        pagecraft_document::walk_services(self, doc);
        self.ctx.dedent();
        self.ctx.add_line("</div>");
    }

    fn visit_service(&mut self, service: &Service) {
        let ctx = &mut self.ctx;
        ctx.add_line(&format!(
            "<div class=\"service\" data-service=\"{}\">",
            escape_html(service.key().as_str())
        ));
        ctx.indent();
        ctx.add_line(&format!("<h3>{}</h3>", escape_html(service.title())));
        ctx.add_line(&format!("<p>{}</p>", escape_html(service.description())));
        ctx.dedent();
        ctx.add_line("</div>");
    }
}

/// Compile a page document to a self-contained HTML page
pub fn compile_to_html(
    document: &PageDocument,
    options: CompileOptions,
) -> Result<String, CompileError> {
    if options.indent.chars().any(|c| !c.is_whitespace()) {
        return Err(CompileError::InvalidOption(format!(
            "indent must be whitespace, got {:?}",
            options.indent
        )));
    }
    document.validate()?;

    let title = page_title(document, &options);
    let mode = options.mode;
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html>");
    ctx.indent();

    compile_head(&title, &mut ctx);

    ctx.add_line("<body>");
    ctx.indent();
    ctx.add_line("<div class=\"page\">");
    ctx.indent();

    if mode == RenderMode::Preview {
        ctx.add_line("<div class=\"preview-notice\">Preview of unsaved changes</div>");
    }

    let mut renderer = HtmlRenderer { ctx };
    renderer.visit_document(document);
    let mut ctx = renderer.ctx;

    ctx.dedent();
    ctx.add_line("</div>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    let html = ctx.get_output();
    debug!(mode = ?mode, bytes = html.len(), "Compiled page to HTML");
    Ok(html)
}

fn page_title(document: &PageDocument, options: &CompileOptions) -> String {
    if let Some(title) = &options.page_title {
        return title.clone();
    }

    match options.mode {
        RenderMode::Preview => "Preview".to_string(),
        // A hidden info block must not leak through the title
        RenderMode::Public => document
            .visible_sections()
            .find(|section| section.key() == SectionKey::Info)
            .and_then(|section| section.info().ok())
            .map(|info| info.name.as_str())
            .filter(|name| !name.is_empty())
            .unwrap_or("Profile")
            .to_string(),
    }
}

fn compile_head(title: &str, ctx: &mut Context) {
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(title)));

    if ctx.options.include_stylesheet {
        ctx.add_line("<style>");
        ctx.indent();
        for rule in STYLESHEET {
            ctx.add_line(rule);
        }
        ctx.dedent();
        ctx.add_line("</style>");
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
