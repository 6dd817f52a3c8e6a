//! Document head: meta tags and links.

use serde::Serialize;

use crate::config::SiteSection;

/// Inter from Google Fonts.
pub const FONT_STYLESHEET: &str = "https://fonts.googleapis.com/css2?family=Inter:ital,opsz,wght@0,14..32,100..900;1,14..32,100..900&display=swap";

/// One `<meta>`-level entry of the document head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MetaTag {
    Title(String),
    Property { property: String, content: String },
    Name { name: String, content: String },
}

/// A `<link>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTag {
    pub rel: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crossorigin: Option<String>,
}

impl LinkTag {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
            crossorigin: None,
        }
    }

    pub fn anonymous(mut self) -> Self {
        self.crossorigin = Some("anonymous".to_string());
        self
    }
}

/// Title, `og:title` and description for every page.
pub fn meta_tags(site: &SiteSection) -> Vec<MetaTag> {
    vec![
        MetaTag::Title(site.title.clone()),
        MetaTag::Property {
            property: "og:title".to_string(),
            content: site.title.clone(),
        },
        MetaTag::Name {
            name: "description".to_string(),
            content: site.description.clone(),
        },
    ]
}

/// Font preconnects, the Inter stylesheet and the site CSS if configured.
pub fn links(site: &SiteSection) -> Vec<LinkTag> {
    let mut links = vec![
        LinkTag::new("preconnect", "https://fonts.googleapis.com"),
        LinkTag::new("preconnect", "https://fonts.gstatic.com").anonymous(),
        LinkTag::new("stylesheet", FONT_STYLESHEET),
    ];
    if let Some(css) = &site.css_path {
        links.push(LinkTag::new("stylesheet", css.clone()));
    }
    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_tags() {
        let tags = meta_tags(&SiteSection::default());
        assert_eq!(tags[0], MetaTag::Title("Very cool app".into()));
        assert_eq!(
            tags[1],
            MetaTag::Property {
                property: "og:title".into(),
                content: "Very cool app".into(),
            }
        );
        assert_eq!(
            tags[2],
            MetaTag::Name {
                name: "description".into(),
                content: "This app is the best".into(),
            }
        );
    }

    #[test]
    fn test_links() {
        let links = links(&SiteSection::default());
        assert_eq!(links.len(), 3);
        assert_eq!(
            links[1],
            LinkTag::new("preconnect", "https://fonts.gstatic.com").anonymous()
        );
        assert_eq!(links[2].rel, "stylesheet");
        assert!(links[2].href.contains("family=Inter"));
    }

    #[test]
    fn test_css_path_appended() {
        let site = SiteSection {
            css_path: Some("/pkg/waypoint.css".into()),
            ..SiteSection::default()
        };
        assert_eq!(links(&site).last().unwrap().href, "/pkg/waypoint.css");
    }

    #[test]
    fn test_title_follows_config() {
        let site = SiteSection {
            title: "A <b> & B".into(),
            ..SiteSection::default()
        };
        assert_eq!(meta_tags(&site)[0], MetaTag::Title("A <b> & B".into()));
    }
}
