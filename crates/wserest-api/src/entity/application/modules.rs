use serde::{Deserialize, Serialize};

use crate::entity::sub_entity;

/// One entry in an application's module chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleItem {
    pub order: u32,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub class: String,
}

impl ModuleItem {
    pub fn new(
        order: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        class: impl Into<String>,
    ) -> Self {
        Self {
            order,
            name: name.into(),
            description: description.into(),
            class: class.into(),
        }
    }
}

/// `modules`: the ordered module list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modules {
    #[serde(default)]
    pub module_list: Vec<ModuleItem>,
}

impl Modules {
    pub fn new(module_list: Vec<ModuleItem>) -> Self {
        Self { module_list }
    }

    /// Append a module, ordering it after the existing ones.
    pub fn push(&mut self, name: &str, description: &str, class: &str) {
        let order = u32::try_from(self.module_list.len()).unwrap_or(u32::MAX);
        self.module_list
            .push(ModuleItem::new(order, name, description, class));
    }
}

sub_entity!(Modules, "modules", Some("/modules"));
