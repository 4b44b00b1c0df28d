/// 喜好選擇畫面一次要選滿的數量
pub const MAX_SELECT: usize = 5;

/// 固定候選集合上的多選，數量有上限
#[derive(Debug, Clone)]
pub struct Selection {
    candidates: Vec<String>,
    selected: Vec<String>,
    limit: usize,
}

impl Selection {
    pub fn new<I, T>(candidates: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
            selected: Vec::new(),
            limit,
        }
    }

    /// 回傳選取狀態是否改變
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(pos) = self.selected.iter().position(|x| x == id) {
            self.selected.remove(pos);
            return true;
        }
        if !self.is_candidate(id) || self.selected.len() >= self.limit {
            tracing::debug!("Selection of '{}' rejected", id);
            return false;
        }
        self.selected.push(id.to_string());
        true
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|x| x == id)
    }

    pub fn is_candidate(&self, id: &str) -> bool {
        self.candidates.iter().any(|x| x == id)
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn can_proceed(&self) -> bool {
        self.selected.len() == self.limit
    }

    pub fn to_query(&self) -> String {
        self.selected.join(",")
    }

    /// 依序套用 `a,b,c`；不在候選內或超過上限的項目會被略過
    pub fn apply_query(&mut self, query: &str) {
        for id in query.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            if !self.is_selected(id) {
                self.toggle(id);
            }
        }
    }

    pub fn from_query<I, T>(candidates: I, limit: usize, query: &str) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut selection = Self::new(candidates, limit);
        selection.apply_query(query);
        selection
    }
}
