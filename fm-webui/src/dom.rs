//! Mount points owned by the router.
//!
//! The terminal stands in for a browser document: `Document` records which
//! mount points are attached and in what order, `HeaderBar` holds the menu
//! links and `Container` is the retained content area views write into.

use ratatui::text::Line;

pub const HEADBAR_CLASS: &str = "headbar";
pub const VIEWPORT_CLASS: &str = "viewport";

/// A mount point that can be attached to the document body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    HeaderBar,
    Viewport,
}

/// The document body, in attachment order.
#[derive(Debug, Default)]
pub struct Document {
    body: Vec<MountPoint>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_child(&mut self, mount: MountPoint) {
        self.body.push(mount);
    }

    pub fn body(&self) -> &[MountPoint] {
        &self.body
    }
}

/// A navigation link. `href` always has the form `#<fragment>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    label: String,
    href: String,
}

impl Anchor {
    pub fn new(label: impl Into<String>, fragment: &str) -> Self {
        Self {
            label: label.into(),
            href: format!("#{fragment}"),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// The fragment this link navigates to, without the leading `#`.
    pub fn fragment(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }
}

/// The header bar holding menu links in insertion order.
#[derive(Debug, Default)]
pub struct HeaderBar {
    links: Vec<Anchor>,
}

impl HeaderBar {
    pub fn class_name(&self) -> &'static str {
        HEADBAR_CLASS
    }

    pub fn append_link(&mut self, anchor: Anchor) {
        self.links.push(anchor);
    }

    pub fn links(&self) -> &[Anchor] {
        &self.links
    }

    pub fn link(&self, index: usize) -> Option<&Anchor> {
        self.links.get(index)
    }
}

/// Retained content area. Views write styled lines here; the host draws them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    class_name: &'static str,
    title: Option<String>,
    lines: Vec<Line<'static>>,
}

impl Container {
    pub fn new(class_name: &'static str) -> Self {
        Self {
            class_name,
            title: None,
            lines: Vec::new(),
        }
    }

    pub fn viewport() -> Self {
        Self::new(VIEWPORT_CLASS)
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    /// Remove all content, including the title.
    pub fn clear(&mut self) {
        self.title = None;
        self.lines.clear();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn push_line(&mut self, line: impl Into<Line<'static>>) {
        self.lines.push(line.into());
    }

    pub fn lines(&self) -> &[Line<'static>] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.lines.is_empty()
    }

    /// Plain-text rendering of the lines, one per row, styles dropped.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
