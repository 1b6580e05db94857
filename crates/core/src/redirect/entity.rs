use crate::redirect::error::RedirectError;
use serde::{Deserialize, Serialize};

/// `/api/get-links` 成功响应中的状态码
pub const SUCCESS_CODE: i64 = 200;

/// # Summary
/// 后台返回的单条分流链接。
///
/// # Invariants
/// - 仅 `redirect_url` 被消费，其余字段仅用于日志。
/// - 后台该列可为空，只有第一条记录的缺失才影响解析结果。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub click_id: Option<i64>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// # Summary
/// `/api/get-links` 响应信封。
///
/// # Invariants
/// - 成功时 `code == 200` 且 `data` 为非空列表。
/// - 失败时后台返回 `{ code: 404 | 500, msg }`，`data` 缺失。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksEnvelope {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<LinkRecord>>,
}

impl LinksEnvelope {
    /// # Summary
    /// 从响应信封中提取跳转目标。
    ///
    /// # Logic
    /// 1. `code` 不为 200 时返回 `Rejected`。
    /// 2. `data` 缺失或为空时返回 `Empty`。
    /// 3. 取第一条记录的 `redirectUrl`，缺失或去除首尾空白后为空视为 `Malformed`。
    ///    其余记录不做校验。
    ///
    /// # Returns
    /// 成功返回 `RedirectTarget`。
    pub fn first_target(&self) -> Result<RedirectTarget, RedirectError> {
        if self.code != SUCCESS_CODE {
            return Err(RedirectError::Rejected {
                code: self.code,
                msg: self.msg.clone().unwrap_or_default(),
            });
        }
        let first = self
            .data
            .as_ref()
            .and_then(|links| links.first())
            .ok_or(RedirectError::Empty)?;
        let url = first.redirect_url.as_deref().unwrap_or_default().trim();
        if url.is_empty() {
            return Err(RedirectError::Malformed("blank redirectUrl".to_string()));
        }
        Ok(RedirectTarget {
            url: url.to_string(),
        })
    }
}

/// # Summary
/// 已解析的跳转目标。
///
/// # Invariants
/// - `url` 非空。未解析时以 `Option::None` 表示，绝不使用空字符串占位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LinksEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_first_target_success() {
        let env = parse(
            r#"{"msg":"success","code":200,"data":[
                {"clickId":1,"redirectUrl":"https://x.test","userName":"a"},
                {"clickId":2,"redirectUrl":"https://y.test","userName":"b"}]}"#,
        );
        assert_eq!(env.first_target().unwrap().url, "https://x.test");
    }

    #[test]
    fn test_minimal_record_parses() {
        let env = parse(r#"{"code":200,"data":[{"redirectUrl":"https://x.test"}]}"#);
        assert_eq!(env.first_target().unwrap().url, "https://x.test");
    }

    #[test]
    fn test_not_found_code_rejected() {
        let env = parse(r#"{"msg":"no links","code":404}"#);
        assert_eq!(
            env.first_target(),
            Err(RedirectError::Rejected {
                code: 404,
                msg: "no links".to_string()
            })
        );
    }

    #[test]
    fn test_empty_data_and_blank_url() {
        let env = parse(r#"{"code":200,"data":[]}"#);
        assert_eq!(env.first_target(), Err(RedirectError::Empty));

        let env = parse(r#"{"code":200,"data":[{"redirectUrl":"  "}]}"#);
        assert!(matches!(
            env.first_target(),
            Err(RedirectError::Malformed(_))
        ));

        let env = parse(r#"{"code":200,"data":[{"redirectUrl":null}]}"#);
        assert!(matches!(
            env.first_target(),
            Err(RedirectError::Malformed(_))
        ));
    }

    #[test]
    fn test_only_first_record_is_validated() {
        let env = parse(
            r#"{"code":200,"data":[
                {"redirectUrl":"https://x.test"},
                {"redirectUrl":null},
                {"clickId":3}]}"#,
        );
        assert_eq!(env.first_target().unwrap().url, "https://x.test");
    }
}
