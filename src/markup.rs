//! Thin typed layer over `scraper` used by the page parsers.
//!
//! Everything in here borrows from a parsed [`Page`], which is not `Send`,
//! so callers extract owned data before their next `.await`.

use crate::error::{Error, Result};
use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document.
#[derive(Debug)]
pub struct Page {
    html: Html,
}

/// A node of the document tree, classified by what the scrapers care about.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// `h1` to `h6`, with its rank.
    Heading(u8, ElementRef<'a>),
    /// A `div`.
    Block(ElementRef<'a>),
    Anchor(ElementRef<'a>),
    Text(&'a str),
    Other,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// All elements matching `css`, in document order.
    pub fn find_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = selector(css)?;
        Ok(self.html.select(&selector).collect())
    }

    /// The `href` of every anchor, in document order.
    pub fn anchors(&self) -> Result<Vec<&str>> {
        Ok(self
            .find_all("a[href]")?
            .into_iter()
            .filter_map(|anchor| attribute(anchor, "href"))
            .collect())
    }

    pub fn by_id(&self, id: &str) -> Result<Option<ElementRef<'_>>> {
        Ok(self.find_all(&format!("#{id}"))?.into_iter().next())
    }

    /// Text of the whole document with all markup dropped.
    pub fn text(&self) -> String {
        text_of(self.html.root_element())
    }
}

impl<'a> Node<'a> {
    pub fn from_element(element: ElementRef<'a>) -> Self {
        match element.value().name() {
            "div" => Node::Block(element),
            "a" => Node::Anchor(element),
            name => match heading_rank(name) {
                Some(rank) => Node::Heading(rank, element),
                None => Node::Other,
            },
        }
    }

    /// The siblings that follow `element`, text nodes included.
    pub fn siblings_after(element: ElementRef<'a>) -> impl Iterator<Item = Node<'a>> {
        element.next_siblings().map(|node| match node.value() {
            scraper::Node::Text(text) => Node::Text(&**text),
            _ => ElementRef::wrap(node).map_or(Node::Other, Node::from_element),
        })
    }

    /// `h2` and `h3` start a new section of a results page.
    pub fn is_section_boundary(&self) -> bool {
        matches!(self, Node::Heading(2 | 3, _))
    }

    /// A `div` carrying a `class` attribute.
    pub fn as_problem_block(&self) -> Option<ElementRef<'a>> {
        match self {
            Node::Block(element) if attribute(*element, "class").is_some() => Some(*element),
            _ => None,
        }
    }
}

/// Descendants of `element` matching `css`, in document order.
pub fn find_within<'a>(element: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(element.select(&selector).collect())
}

pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn attribute<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::parse(format!("bad selector `{css}`: {e}")))
}

fn heading_rank(name: &str) -> Option<u8> {
    name.strip_prefix('h')?
        .parse()
        .ok()
        .filter(|rank| (1..=6).contains(rank))
}
