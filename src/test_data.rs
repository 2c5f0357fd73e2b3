#[cfg(test)]
pub const ZOLA_POST: &str = r#"+++
title = "Zola post"
date = 2024-02-27
authors = ["Thiago"]
[taxonomies]
tags = ["rust", "zola"]

+++

Intro paragraph.

---

After the rule.
"#;

#[cfg(test)]
pub const YAML_POST: &str = "---
layout: post
title: 'YAML post'
---

Body of a YAML post.
";
