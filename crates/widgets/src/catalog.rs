use stockpage_core::common::SymbolRecord;

/// # Summary
/// 静态证券代码目录。
///
/// # Invariants
/// - 记录在构造时一次性载入，之后不可变。
/// - `lookup` 严格按目录顺序返回，不做排序或模糊匹配。
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    // 目录记录，顺序即展示顺序
    records: Vec<SymbolRecord>,
}

impl SymbolCatalog {
    /// # Summary
    /// 由给定记录构造目录。
    ///
    /// # Arguments
    /// * `records`: 目录内容，调用方保证代码唯一且为大写。
    pub fn new(records: Vec<SymbolRecord>) -> Self {
        Self { records }
    }

    /// # Summary
    /// 热门美股目录。
    ///
    /// # Returns
    /// 包含 10 只热门股票的目录。
    pub fn popular() -> Self {
        fn stock(symbol: &str, name: &str) -> SymbolRecord {
            SymbolRecord::new(symbol, name)
        }

        Self::new(vec![
            stock("AAPL", "Apple Inc."),
            stock("MSFT", "Microsoft"),
            stock("GOOGL", "Alphabet"),
            stock("AMZN", "Amazon"),
            stock("TSLA", "Tesla"),
            stock("META", "Meta Platforms"),
            stock("NVDA", "NVIDIA"),
            stock("JPM", "JPMorgan Chase"),
            stock("JNJ", "Johnson & Johnson"),
            stock("V", "Visa"),
        ])
    }

    /// # Summary
    /// 按关键字过滤目录。
    ///
    /// # Logic
    /// 1. 关键字去除首尾空白并转为大写。
    /// 2. 空关键字直接返回空列表 (表示"无建议"而非"全部")。
    /// 3. 代码包含关键字，或大写后的名称包含关键字即视为匹配。
    ///
    /// # Arguments
    /// * `query`: 用户输入的原始文本。
    ///
    /// # Returns
    /// 按目录顺序排列的匹配记录。
    pub fn lookup(&self, query: &str) -> Vec<SymbolRecord> {
        let needle = query.trim().to_uppercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|r| r.symbol.contains(&needle) || r.name.to_uppercase().contains(&needle))
            .cloned()
            .collect()
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::popular()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(records: &[SymbolRecord]) -> Vec<&str> {
        records.iter().map(|r| r.symbol.as_str()).collect()
    }

    #[test]
    fn test_empty_query_matches_nothing() {
        let catalog = SymbolCatalog::popular();
        assert!(catalog.lookup("").is_empty());
        assert!(catalog.lookup("   ").is_empty());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let catalog = SymbolCatalog::popular();
        assert_eq!(symbols(&catalog.lookup("aapl")), vec!["AAPL"]);
        assert_eq!(symbols(&catalog.lookup("  apple ")), vec!["AAPL"]);
        assert_eq!(symbols(&catalog.lookup("nvidia")), vec!["NVDA"]);
    }

    #[test]
    fn test_lookup_keeps_catalog_order() {
        let catalog = SymbolCatalog::popular();
        // "A" 同时命中代码与名称，结果需保持目录顺序
        let records = catalog.lookup("a");
        let found = symbols(&records);
        assert_eq!(
            found,
            vec!["AAPL", "GOOGL", "AMZN", "TSLA", "META", "NVDA", "JPM", "V"]
        );
    }

    #[test]
    fn test_lookup_matches_name_only() {
        let catalog = SymbolCatalog::popular();
        assert_eq!(symbols(&catalog.lookup("chase")), vec!["JPM"]);
        assert_eq!(symbols(&catalog.lookup("&")), vec!["JNJ"]);
    }

    #[test]
    fn test_every_substring_finds_its_record() {
        let catalog = SymbolCatalog::popular();
        for record in catalog.records() {
            for text in [&record.symbol, &record.name] {
                let chars: Vec<char> = text.chars().collect();
                for start in 0..chars.len() {
                    for end in start + 1..=chars.len() {
                        let q: String = chars[start..end].iter().collect();
                        if q.trim().is_empty() {
                            continue;
                        }
                        let found = catalog.lookup(&q.to_lowercase());
                        assert!(
                            found.contains(record),
                            "query {:?} should match {}",
                            q,
                            record.symbol
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_no_match() {
        let catalog = SymbolCatalog::popular();
        assert!(catalog.lookup("ZZZ").is_empty());
    }
}
