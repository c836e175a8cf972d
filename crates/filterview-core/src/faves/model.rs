use serde::{Deserialize, Serialize};

/// A filter saved by the user under their own name, with its parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fave {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "originalName")]
    pub original_name: String,
    pub command: String,
    #[serde(rename = "preview")]
    pub preview_command: String,
    #[serde(rename = "defaultParameters", default)]
    pub default_values: Vec<String>,
}

impl Fave {
    pub fn new(
        name: impl Into<String>,
        original_name: impl Into<String>,
        command: impl Into<String>,
        preview_command: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            original_name: original_name.into(),
            command: command.into(),
            preview_command: preview_command.into(),
            default_values: Vec::new(),
        }
    }

    pub fn with_default_values(mut self, values: Vec<String>) -> Self {
        self.default_values = values;
        self
    }
}

/// Ordered collection of favorites. Names are unique.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavesModel {
    faves: Vec<Fave>,
}

impl FavesModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.faves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fave> {
        self.faves.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&Fave> {
        self.faves.iter().find(|f| f.name == name)
    }

    /// Append a fave, renaming it if its name is taken. Returns the name used.
    pub fn add(&mut self, mut fave: Fave) -> String {
        fave.name = self.unique_name(&fave.name);
        let name = fave.name.clone();
        self.faves.push(fave);
        name
    }

    pub fn remove(&mut self, name: &str) -> Option<Fave> {
        let index = self.faves.iter().position(|f| f.name == name)?;
        Some(self.faves.remove(index))
    }

    /// `base` if free, otherwise the first free `base (n)` with `n >= 2`.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.contains(base) {
            return base.to_string();
        }
        (2..)
            .map(|n| format!("{base} ({n})"))
            .find(|candidate| !self.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

impl FromIterator<Fave> for FavesModel {
    fn from_iter<I: IntoIterator<Item = Fave>>(iter: I) -> Self {
        let mut model = FavesModel::new();
        for fave in iter {
            model.add(fave);
        }
        model
    }
}

impl<'a> IntoIterator for &'a FavesModel {
    type Item = &'a Fave;
    type IntoIter = std::slice::Iter<'a, Fave>;

    fn into_iter(self) -> Self::IntoIter {
        self.faves.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_renames_duplicates() {
        let mut model = FavesModel::new();
        assert_eq!(model.add(Fave::new("Sharpen", "Unsharp", "u", "u")), "Sharpen");
        assert_eq!(model.add(Fave::new("Sharpen", "Unsharp", "u", "u")), "Sharpen (2)");
        assert_eq!(model.add(Fave::new("Sharpen", "Unsharp", "u", "u")), "Sharpen (3)");
        assert_eq!(model.len(), 3);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut model: FavesModel = ["a", "b", "c"]
            .into_iter()
            .map(|n| Fave::new(n, n, n, n))
            .collect();
        assert!(model.remove("b").is_some());
        let names: Vec<&str> = model.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}
