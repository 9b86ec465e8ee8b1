//! District name search.

/// Case-insensitive search over the district list.
#[derive(Debug, Clone, Default)]
pub struct DistrictSearch {
    districts: Vec<String>,
    /// Lowercased copies, index-aligned with `districts`
    folded: Vec<String>,
}

impl DistrictSearch {
    pub fn new(districts: Vec<String>) -> Self {
        let folded = districts.iter().map(|d| d.to_lowercase()).collect();
        Self { districts, folded }
    }

    /// Districts containing `query` (case-insensitive), in list order with
    /// their stored casing. Duplicates in the list are kept.
    pub fn search(&self, query: &str) -> Vec<String> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        self.folded
            .iter()
            .zip(&self.districts)
            .filter(|(folded, _)| folded.contains(&query))
            .map(|(_, district)| district.clone())
            .collect()
    }

    /// First district equal to `name` ignoring case
    pub fn find_exact(&self, name: &str) -> Option<&str> {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        self.folded
            .iter()
            .position(|folded| *folded == name)
            .map(|idx| self.districts[idx].as_str())
    }

    pub fn districts(&self) -> &[String] {
        &self.districts
    }

    pub fn len(&self) -> usize {
        self.districts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}
