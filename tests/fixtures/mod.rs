//! Test fixtures: synthetic hierarchies with known shapes and sizes

use chrono::{TimeZone, Utc};
use farminv::models::{
    FarmAttributes, FileInfo, FolderAttributes, ListAttributes, ListField, NodeData,
    RoleAssignment, SiteAttributes, SiteCollectionAttributes, WebApplicationAttributes,
};
use farminv::services::source::{MemoryHierarchy, SourceNode};
use std::path::{Path, PathBuf};

pub const WEB_APP_URL: &str = "https://intranet.contoso.com";

/// Path of the checked-in JSON export
pub fn farm_json_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/farm.json")
}

pub fn site_url(name: &str) -> String {
    format!("{WEB_APP_URL}/sites/{name}")
}

pub fn site(name: &str) -> SourceNode {
    SourceNode::new(
        format!("web-{name}"),
        site_url(name),
        NodeData::Site(SiteAttributes {
            title: name.to_uppercase(),
            url: site_url(name),
            web_template: "STS#0".to_string(),
            language: 1033,
            created: Some(Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap()),
            ..SiteAttributes::default()
        }),
    )
}

pub fn list(site_name: &str, title: &str, field_count: usize) -> SourceNode {
    let url = format!("{}/Lists/{title}", site_url(site_name));
    let fields = (0..field_count)
        .map(|i| ListField {
            internal_name: format!("Field{i}"),
            title: format!("Field {i}"),
            field_type: "Text".to_string(),
            hidden: false,
        })
        .collect();

    SourceNode::new(
        format!("list-{site_name}-{title}"),
        url.clone(),
        NodeData::List(ListAttributes {
            title: title.to_string(),
            url,
            base_template: "GenericList".to_string(),
            fields,
            ..ListAttributes::default()
        }),
    )
}

pub fn folder(url: &str, file_lengths: &[u64]) -> SourceNode {
    let files = file_lengths
        .iter()
        .enumerate()
        .map(|(i, length)| FileInfo {
            name: format!("file{i}.docx"),
            length: *length,
        })
        .collect();

    SourceNode::new(
        format!("folder-{url}"),
        url,
        NodeData::Folder(FolderAttributes {
            name: url.rsplit('/').next().unwrap_or(url).to_string(),
            url: url.to_string(),
            files,
            ..FolderAttributes::default()
        }),
    )
}

pub fn role(member: &str, roles: &[&str]) -> RoleAssignment {
    RoleAssignment {
        member: member.to_string(),
        role_definitions: roles.iter().map(ToString::to_string).collect(),
    }
}

/// Farm → web application → site collection → the given sites
pub fn farm_with_sites(sites: Vec<SourceNode>) -> MemoryHierarchy {
    MemoryHierarchy::new(farm_node_with_sites(sites))
}

/// Export tree behind [`farm_with_sites`]
pub fn farm_node_with_sites(sites: Vec<SourceNode>) -> SourceNode {
    let collection = SourceNode::new(
        "sc-root",
        WEB_APP_URL,
        NodeData::SiteCollection(SiteCollectionAttributes {
            url: WEB_APP_URL.to_string(),
            owner: "CONTOSO\\admin".to_string(),
            ..SiteCollectionAttributes::default()
        }),
    )
    .with_children(sites);

    let web_app = SourceNode::new(
        "wa-intranet",
        WEB_APP_URL,
        NodeData::WebApplication(WebApplicationAttributes {
            display_name: "Intranet".to_string(),
            url: WEB_APP_URL.to_string(),
            ..WebApplicationAttributes::default()
        }),
    )
    .child(collection);

    SourceNode::new(
        "farm-1",
        "SharePoint_Config",
        NodeData::Farm(FarmAttributes {
            build_version: "16.0.10337.12109".to_string(),
            ..FarmAttributes::default()
        }),
    )
    .child(web_app)
}

/// `sites` sites with `lists` lists each, every list carrying `fields` fields
pub fn grid_farm(sites: usize, lists: usize, fields: usize) -> MemoryHierarchy {
    let sites = (0..sites)
        .map(|s| {
            let name = format!("s{s}");
            let children: Vec<SourceNode> = (0..lists)
                .map(|l| list(&name, &format!("L{l}"), fields))
                .collect();
            site(&name).with_children(children)
        })
        .collect();
    farm_with_sites(sites)
}

/// Lines of a text file; empty when the file is missing
pub fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|text| text.lines().map(ToString::to_string).collect())
        .unwrap_or_default()
}
