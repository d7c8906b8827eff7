use serde::{Deserialize, Serialize};

use crate::listing::Keyed;

/// Well-known type tag for folder nodes.
pub const FOLDER_TYPE: &str = "Folder";

/// One node of a document tree snapshot.
///
/// `children: Some(..)` marks a folder, even when the folder is empty;
/// leaf documents carry no `children` field at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DocNode>>,
}

impl DocNode {
    pub fn folder(uuid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            doc_type: FOLDER_TYPE.to_string(),
            children: Some(Vec::new()),
        }
    }

    pub fn leaf(
        uuid: impl Into<String>,
        name: impl Into<String>,
        doc_type: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            doc_type: doc_type.into(),
            children: None,
        }
    }

    pub fn with_children(mut self, children: Vec<DocNode>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn is_folder(&self) -> bool {
        self.children.is_some()
    }

    /// Children in order, empty for leaf nodes.
    pub fn children(&self) -> &[DocNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn doc_ref(&self) -> DocRef {
        DocRef {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            doc_type: self.doc_type.clone(),
        }
    }
}

/// Child summary handed to listings; carries no tree structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocRef {
    pub uuid: String,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
}

impl Keyed for DocRef {
    fn key(&self) -> &str {
        &self.uuid
    }
}

/// Why a folder is open, if it is.
///
/// A folder opened only by an active search is revoked the moment the
/// search no longer applies; an explicit user open persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    OpenedByUser,
    OpenedBySearch,
}

impl OpenState {
    pub fn is_open(self) -> bool {
        !matches!(self, OpenState::Closed)
    }
}
