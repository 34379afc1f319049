/// TyranoScript 标签识别
///
/// 只处理与可翻译文本相关的子集：方括号控制标签、`[glink]` 按钮、
/// `[emb]` 嵌入表达式和行尾 `[p]`。不做完整的脚本解析。

use regex::{Captures, Regex};
use once_cell::sync::Lazy;

/// 文本块起始标记
pub const TEXT_BLOCK_START: &str = "[tb_start_text";
/// 文本块结束标记
pub const TEXT_BLOCK_END: &str = "[_tb_end_text]";
/// 行尾"继续"标签
pub const CONTINUE_TAG: &str = "[p]";
/// 按钮文本中的不换行空格转义
pub const NBSP_ESCAPE: &str = "&nbsp;";
/// 按钮文本中的双引号转义
pub const QUOTE_ESCAPE: &str = "&quot;";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid tag regex"));

static GLINK_TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\[glink\b[^\]]*\btext="([^"]*)"[^\]]*\]"#).expect("valid glink regex")
});

static CHAR_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#(.+)$").expect("valid character name regex"));

static EMB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\[emb\s+exp="[^"]*"\]"#).expect("valid emb regex"));

/// 去除所有方括号标签
pub fn strip_tags(line: &str) -> String {
    TAG_RE.replace_all(line, "").into_owned()
}

/// 去除标签后是否只剩空白
pub fn is_tag_only(line: &str) -> bool {
    strip_tags(line).trim().is_empty()
}

/// 解析角色名行，`line` 应已 trim
///
/// `#Alice` → `Some("Alice")`；`#`、`#   ` 返回 `None`
pub fn parse_character_name(line: &str) -> Option<&str> {
    let caps = CHAR_NAME_RE.captures(line)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// 行内所有 `[emb exp="..."]` 标签（按出现顺序）
pub fn embedded_expressions(line: &str) -> Vec<&str> {
    EMB_RE.find_iter(line).map(|m| m.as_str()).collect()
}

/// `&nbsp;` → 空格
pub fn decode_nbsp(label: &str) -> String {
    label.replace(NBSP_ESCAPE, " ")
}

/// 空格 → `&nbsp;`
pub fn encode_nbsp(label: &str) -> String {
    label.replace(' ', NBSP_ESCAPE)
}

/// 写回 `[glink]` text 属性的文本：`"` → `&quot;`，空格 → `&nbsp;`
pub fn encode_label(label: &str) -> String {
    encode_nbsp(&label.replace('"', QUOTE_ESCAPE))
}

/// 行内所有 `[glink]` 的原始 text 属性值（未做转义处理）
pub fn glink_labels(line: &str) -> Vec<&str> {
    GLINK_TEXT_RE
        .captures_iter(line)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// 就地替换行内每个 `[glink]` 的 text 属性值
///
/// `replace` 收到原始属性值，返回 `Some(新值)` 时替换，`None` 时保留。
/// 标签其余部分和行内其他内容保持不变。
pub fn replace_glink_labels<F>(line: &str, mut replace: F) -> String
where
    F: FnMut(&str) -> Option<String>,
{
    GLINK_TEXT_RE
        .replace_all(line, |caps: &Captures| {
            let whole = &caps[0];
            let (Some(outer), Some(label)) = (caps.get(0), caps.get(1)) else {
                return whole.to_string();
            };

            match replace(label.as_str()) {
                Some(new_label) => {
                    let start = label.start() - outer.start();
                    let end = label.end() - outer.start();
                    format!("{}{}{}", &whole[..start], new_label, &whole[end..])
                }
                None => whole.to_string(),
            }
        })
        .into_owned()
}
