// catalog.rs: the fixed action table (actions.json).
use serde::Deserialize;
use std::collections::HashSet;
use crate::body::{BodyModel, PartKind};
use crate::error::{ModelError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category { Sport, Daily }

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ActionDefinition {
    pub id: String,
    pub label: String,
    pub category: Category,
    pub active_bones: Vec<String>,
    #[serde(default)] pub active_muscles: Vec<String>,
}

impl ActionDefinition {
    pub fn names(&self, kind: PartKind) -> &[String] {
        match kind { PartKind::Bone => &self.active_bones, PartKind::Muscle => &self.active_muscles }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Catalog { actions: Vec<ActionDefinition> }

impl Catalog {
    pub fn load() -> Result<Self> {
        let cat: Catalog = crate::json_loader::load("actions.json")?;
        cat.check_shape()?;
        Ok(cat)
    }

    #[cfg(test)]
    pub fn from_actions(actions: Vec<ActionDefinition>) -> Result<Self> {
        let cat = Self { actions };
        cat.check_shape()?;
        Ok(cat)
    }

    pub fn actions(&self) -> &[ActionDefinition] { &self.actions }
    pub fn len(&self) -> usize { self.actions.len() }
    #[cfg(test)]
    pub fn get(&self, id: &str) -> Option<&ActionDefinition> { self.actions.iter().find(|a| a.id == id) }

    /// Catalog indices of one category, in file order.
    pub fn by_category(&self, category: Category) -> impl Iterator<Item = (usize, &ActionDefinition)> + '_ {
        self.actions.iter().enumerate().filter(move |(_, a)| a.category == category)
    }

    /// Every referenced bone and muscle must exist in the model's registries.
    pub fn validate(&self, model: &BodyModel) -> Result<()> {
        for a in &self.actions {
            for kind in [PartKind::Bone, PartKind::Muscle] {
                if let Some(name) = a.names(kind).iter().find(|n| model.part(kind, n).is_none()) {
                    return Err(ModelError::UnknownPart { action: a.id.clone(), kind, name: name.clone() });
                }
            }
        }
        Ok(())
    }

    // Ids unique, each part list an ordered set.
    fn check_shape(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for a in &self.actions {
            if !ids.insert(a.id.as_str()) {
                return Err(ModelError::InvalidCatalog(format!("duplicate action id '{}'", a.id)));
            }
            for kind in [PartKind::Bone, PartKind::Muscle] {
                let mut seen = HashSet::new();
                if let Some(dup) = a.names(kind).iter().find(|n| !seen.insert(n.as_str())) {
                    return Err(ModelError::InvalidCatalog(format!("action '{}' lists {kind} '{dup}' twice", a.id)));
                }
            }
        }
        Ok(())
    }
}
