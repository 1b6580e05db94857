use serde::{Deserialize, Serialize};
use std::fmt;

/// # Summary
/// 证券代码目录中的一条记录。
///
/// # Invariants
/// - `symbol` 为大写交易代码，在目录内唯一。
/// - 启动时加载，页面生命周期内不可变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolRecord {
    // 股票代码 (例如: AAPL)
    pub symbol: String,
    // 展示名称 (例如: Apple Inc.)
    pub name: String,
}

impl SymbolRecord {
    /// # Summary
    /// 由代码与名称构造记录。
    ///
    /// # Arguments
    /// * `symbol`: 交易代码，原样保存，调用方负责保证大写。
    /// * `name`: 展示名称。
    ///
    /// # Returns
    /// 新的 `SymbolRecord`。
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for SymbolRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.symbol, self.name)
    }
}
