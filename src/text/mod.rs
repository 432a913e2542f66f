//! 文本工具模块
//!
//! 目前只包含基于键名的模板替换：模板中的 `{key}` 被映射中对应值的 `Display` 形式替换。
//!
//! ```
//! use std::collections::HashMap;
//! use unitoolz::text::TemplateExt;
//!
//! let mut values = HashMap::new();
//! values.insert("name", "Ann");
//! assert_eq!("Hi {name}!".format_from_map(&values), "Hi Ann!");
//! ```

mod template;

pub use template::{format_from_map, TemplateExt, TemplateValues};
