//! # テンプレートレジストリ
//!
//! テンプレート名から本文の生成方法と件名を決定する。
//!
//! 設定の `html_templates` による上書きは組み込みテンプレートより優先される。

use std::collections::HashMap;

use marketlink_domain::notification::{EmailTemplate, HtmlTemplateOverride, TemplateKey};

/// 解決されたテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTemplate {
    /// 設定で与えられた静的 HTML（変数展開なし）
    Static(String),
    /// 組み込みテンプレート
    Renderer(EmailTemplate),
}

/// テンプレートレジストリ
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    overrides: HashMap<String, HtmlTemplateOverride>,
}

impl TemplateRegistry {
    pub fn new(overrides: HashMap<String, HtmlTemplateOverride>) -> Self {
        Self { overrides }
    }

    /// テンプレートを解決する
    ///
    /// 上書きが存在する名前は、内容が空でも組み込みテンプレートへフォールバックしない。
    pub fn resolve_template(&self, name: &str) -> Option<ResolvedTemplate> {
        if let Some(html_override) = self.overrides.get(name) {
            if html_override.content.is_empty() {
                return None;
            }
            return Some(ResolvedTemplate::Static(html_override.content.clone()));
        }

        match TemplateKey::parse(name) {
            TemplateKey::Builtin(template) => Some(ResolvedTemplate::Renderer(template)),
            TemplateKey::Unknown(_) => None,
        }
    }

    /// 件名を決定する
    ///
    /// 上書きの件名が空でなければそれを使い、それ以外は既定件名。
    pub fn resolve_subject(&self, name: &str) -> String {
        self.overrides
            .get(name)
            .and_then(|o| o.subject.as_deref())
            .filter(|subject| !subject.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| TemplateKey::parse(name).default_subject().to_string())
    }
}
