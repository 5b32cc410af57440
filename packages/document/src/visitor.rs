use crate::document::PageDocument;
use crate::section::{BannerContent, InfoContent, Section, SectionContent, Service};

/// Visitor over the visible parts of a page, in render order
///
/// The default methods walk the document: visible sections in section order,
/// and for the services section, visible services in service order. Anything
/// that renders the visible page (preview, public page) implements
/// this trait, so all of them agree on what is shown and in which order.
pub trait PageVisitor: Sized {
    fn visit_document(&mut self, doc: &PageDocument) {
        walk_document(self, doc);
    }

    fn visit_section(&mut self, doc: &PageDocument, section: &Section) {
        walk_section(self, doc, section);
    }

    fn visit_info(&mut self, _section: &Section, _info: &InfoContent) {
        // Leaf node, no children to walk
    }

    fn visit_banner(&mut self, _section: &Section, _banner: &BannerContent) {
        // Leaf node, no children to walk
    }

    fn visit_services(&mut self, doc: &PageDocument, _section: &Section) {
        walk_services(self, doc);
    }

    fn visit_service(&mut self, _service: &Service) {
        // Leaf node, no children to walk
    }
}

pub fn walk_document<V: PageVisitor>(visitor: &mut V, doc: &PageDocument) {
    for section in doc.visible_sections() {
        visitor.visit_section(doc, section);
    }
}

pub fn walk_section<V: PageVisitor>(visitor: &mut V, doc: &PageDocument, section: &Section) {
    match section.content() {
        SectionContent::Info(info) => visitor.visit_info(section, info),
        SectionContent::Banner(banner) => visitor.visit_banner(section, banner),
        SectionContent::Services => visitor.visit_services(doc, section),
    }
}

pub fn walk_services<V: PageVisitor>(visitor: &mut V, doc: &PageDocument) {
    for service in doc.visible_services() {
        visitor.visit_service(service);
    }
}
