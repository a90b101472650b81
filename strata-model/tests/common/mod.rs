//! Shared fixtures for content model tests.

#![allow(dead_code)]

use strata_model::{ContentType, PropertyGroup, PropertyType, Template, TracksChanges};
use strata_types::{DataTypeId, NodeId, TemplateId};

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn textstring(alias: &str) -> PropertyType {
    PropertyType::new(alias, alias, DataTypeId::new(-88))
}

pub fn template(id: i32, alias: &str) -> Template {
    Template::new(TemplateId::new(id), alias, alias)
}

/// A clean "article" content type:
/// - "Content": `title`, `bodyText`
/// - "SEO": `metaDescription`
pub fn article() -> ContentType {
    init_tracing();
    let mut ct = ContentType::new(NodeId::ROOT);
    ct.set_alias("article");
    ct.set_name("Article");

    let mut content = PropertyGroup::new("Content");
    content.add_property_type(textstring("title")).unwrap();
    content.add_property_type(textstring("bodyText")).unwrap();
    ct.insert_property_group(content).unwrap();

    let mut seo = PropertyGroup::new("SEO");
    seo.add_property_type(textstring("metaDescription")).unwrap();
    ct.insert_property_group(seo).unwrap();

    ct.reset_dirty_properties();
    ct
}

/// A clean content type with the given alias and one property per alias.
pub fn composable(alias: &str, property_aliases: &[&str]) -> ContentType {
    let mut ct = ContentType::new(NodeId::ROOT);
    ct.set_alias(alias);
    for property_alias in property_aliases {
        ct.add_property_type(textstring(property_alias), "Composed")
            .unwrap();
    }
    ct.reset_dirty_properties();
    ct
}
