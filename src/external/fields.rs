//! User-declared field list of the external system

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::FieldDescriptor;
use crate::wizard::gates::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalFields {
    fields: Vec<FieldDescriptor>,
}

impl ExternalFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn as_slice(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.fields.iter().any(|f| f.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.id.clone()).collect()
    }

    /// Append a field; the id and name must be set and the id unused
    pub fn add_field(&mut self, field: FieldDescriptor) -> Result<(), ValidationError> {
        let field = trimmed(field);
        if field.id.is_empty() || field.name.is_empty() {
            return Err(ValidationError::FieldIdAndNameRequired);
        }
        if self.contains_id(&field.id) {
            return Err(ValidationError::DuplicateFieldId(field.id));
        }
        debug!(id = %field.id, "added external field");
        self.fields.push(field);
        Ok(())
    }

    /// Replace the attributes of the field at `index`; its id cannot change
    pub fn update_field(
        &mut self,
        index: usize,
        field: FieldDescriptor,
    ) -> Result<(), ValidationError> {
        let field = trimmed(field);
        let existing = self
            .fields
            .get_mut(index)
            .ok_or(ValidationError::NoSuchField(index))?;
        if field.name.is_empty() {
            return Err(ValidationError::FieldIdAndNameRequired);
        }
        if !field.id.is_empty() && field.id != existing.id {
            return Err(ValidationError::FieldIdImmutable(existing.id.clone()));
        }
        let id = std::mem::take(&mut existing.id);
        *existing = FieldDescriptor { id, ..field };
        Ok(())
    }

    /// Remove the field at `index` once `confirm` agrees
    pub fn remove_field<F>(
        &mut self,
        index: usize,
        confirm: F,
    ) -> Result<Option<FieldDescriptor>, ValidationError>
    where
        F: FnOnce(&FieldDescriptor) -> bool,
    {
        let field = self
            .fields
            .get(index)
            .ok_or(ValidationError::NoSuchField(index))?;
        if !confirm(field) {
            return Ok(None);
        }
        debug!(index, "removed external field");
        Ok(Some(self.fields.remove(index)))
    }

    /// Fields whose id, name or description contain `term`
    pub fn search(&self, term: &str) -> Vec<&FieldDescriptor> {
        self.fields.iter().filter(|f| f.matches(term)).collect()
    }

    /// Append already-validated fields
    pub fn extend(&mut self, fields: impl IntoIterator<Item = FieldDescriptor>) {
        self.fields.extend(fields);
    }

    /// Replace the whole list (connection-test discovery)
    pub fn replace_all(&mut self, fields: Vec<FieldDescriptor>) {
        self.fields = fields;
    }

    pub fn into_vec(self) -> Vec<FieldDescriptor> {
        self.fields
    }
}

impl<'a> IntoIterator for &'a ExternalFields {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

fn trimmed(mut field: FieldDescriptor) -> FieldDescriptor {
    field.id = field.id.trim().to_string();
    field.name = field.name.trim().to_string();
    field
}
