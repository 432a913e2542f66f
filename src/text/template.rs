//! `{key}` 模板替换

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Write};
use std::hash::{BuildHasher, Hash};

/// 模板取值来源
///
/// 按键名返回可显示的值，找不到时返回 `None`，对应的占位符保持原样。
pub trait TemplateValues {
    fn lookup(&self, key: &str) -> Option<&dyn Display>;
}

impl<K, V, S> TemplateValues for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: Display,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<&dyn Display> {
        self.get(key).map(|value| value as &dyn Display)
    }
}

impl<K, V> TemplateValues for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: Display,
{
    fn lookup(&self, key: &str) -> Option<&dyn Display> {
        self.get(key).map(|value| value as &dyn Display)
    }
}

impl<T: TemplateValues + ?Sized> TemplateValues for &T {
    fn lookup(&self, key: &str) -> Option<&dyn Display> {
        (**self).lookup(key)
    }
}

/// 用 `values` 中的值替换模板中的 `{key}`
///
/// 从左到右扫描一遍，替换进来的文本不会再被扫描。
/// 未知的键、未闭合的 `{` 都原样保留；`{{name}` 中外层的 `{` 按普通字符处理。
///
/// ```
/// use std::collections::HashMap;
/// use std::fmt::Display;
/// use unitoolz::text::format_from_map;
///
/// let age = 30;
/// let mut values: HashMap<&str, &dyn Display> = HashMap::new();
/// values.insert("name", &"Ann");
/// values.insert("age", &age);
///
/// assert_eq!(format_from_map("Hello {name}, you are {age}", &values), "Hello Ann, you are 30");
/// ```
pub fn format_from_map<V: TemplateValues + ?Sized>(template: &str, values: &V) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        match after.find(|c: char| c == '{' || c == '}') {
            Some(close) if after[close..].starts_with('}') => {
                let key = &after[..close];
                match values.lookup(key) {
                    // 写入 String 不会失败
                    Some(value) => {
                        let _ = write!(output, "{}", value);
                    }
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            _ => {
                output.push('{');
                rest = after;
            }
        }
    }

    output.push_str(rest);
    output
}

/// 字符串模板扩展 trait
pub trait TemplateExt {
    fn format_from_map<V: TemplateValues + ?Sized>(&self, values: &V) -> String;
}

impl TemplateExt for str {
    fn format_from_map<V: TemplateValues + ?Sized>(&self, values: &V) -> String {
        format_from_map(self, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("name", "Ann".to_string());
        values.insert("age", "30".to_string());
        values
    }

    #[test]
    fn test_basic_substitution() {
        let result = "Hello {name}, you are {age}".format_from_map(&people());
        assert_eq!(result, "Hello Ann, you are 30");
    }

    #[test]
    fn test_mixed_value_types() {
        let level = 7u32;
        let ratio = 0.5f32;
        let mut values: HashMap<&str, &dyn Display> = HashMap::new();
        values.insert("level", &level);
        values.insert("ratio", &ratio);

        assert_eq!(format_from_map("L{level} x{ratio}", &values), "L7 x0.5");
    }

    #[test]
    fn test_unknown_keys_kept() {
        assert_eq!("{name} has {gold} gold".format_from_map(&people()), "Ann has {gold} gold");
    }

    #[test]
    fn test_extra_entries_ignored() {
        assert_eq!("no placeholders".format_from_map(&people()), "no placeholders");
    }

    #[test]
    fn test_repeated_key() {
        assert_eq!("{name}{name}".format_from_map(&people()), "AnnAnn");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let mut values = BTreeMap::new();
        values.insert("a", "{b}");
        values.insert("b", "B");

        assert_eq!(format_from_map("{a} {b}", &values), "{b} B");
    }

    #[test]
    fn test_stray_braces() {
        let values = people();
        assert_eq!(format_from_map("{{name}", &values), "{Ann");
        assert_eq!(format_from_map("{name}}", &values), "Ann}");
        assert_eq!(format_from_map("open {name", &values), "open {name");
        assert_eq!(format_from_map("}{", &values), "}{");
        assert_eq!(format_from_map("{}", &values), "{}");
    }

    #[test]
    fn test_empty_map_and_template() {
        let empty: HashMap<String, i32> = HashMap::new();
        assert_eq!(format_from_map("{x}", &empty), "{x}");
        assert_eq!(format_from_map("", &people()), "");
    }

    #[test]
    fn test_unicode_text() {
        let mut values = HashMap::new();
        values.insert("名字".to_string(), "小明");
        assert_eq!("你好，{名字}！".format_from_map(&values), "你好，小明！");
    }

    #[test]
    fn test_reference_values() {
        let values = people();
        let by_ref = &values;
        assert_eq!(format_from_map("{name}", &by_ref), "Ann");
    }
}
