use std::collections::BTreeMap;

/// One category of the hierarchy used to group graph nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryNode {
    /// A plain list of package names.
    Leaf(Vec<String>),
    /// Named subcategories plus packages that belong directly to this category.
    Group {
        children: Vec<(String, CategoryNode)>,
        packages: Vec<String>,
    },
}

impl CategoryNode {
    pub fn leaf<I, S>(packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CategoryNode::Leaf(packages.into_iter().map(Into::into).collect())
    }

    /// Direct packages of this category, not counting subcategories.
    pub fn direct_packages(&self) -> &[String] {
        match self {
            CategoryNode::Leaf(packages) => packages,
            CategoryNode::Group { packages, .. } => packages,
        }
    }

    pub fn children(&self) -> &[(String, CategoryNode)] {
        match self {
            CategoryNode::Leaf(_) => &[],
            CategoryNode::Group { children, .. } => children,
        }
    }

    fn collect_packages<'a>(&'a self, out: &mut Vec<&'a str>) {
        for (_, child) in self.children() {
            child.collect_packages(out);
        }
        out.extend(self.direct_packages().iter().map(String::as_str));
    }
}

/// Top-level categories in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryHierarchy {
    pub roots: Vec<(String, CategoryNode)>,
}

impl CategoryHierarchy {
    pub fn new(roots: Vec<(String, CategoryNode)>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every package named anywhere in the hierarchy, subcategories first.
    pub fn packages(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for (_, node) in &self.roots {
            node.collect_packages(&mut out);
        }
        out
    }

    pub fn contains(&self, package: &str) -> bool {
        self.packages().contains(&package)
    }
}

/// Descriptions and categories of known packages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCatalog {
    pub descriptions: BTreeMap<String, String>,
    pub categories: CategoryHierarchy,
}

impl PackageCatalog {
    pub fn empty() -> Self {
        Self {
            descriptions: BTreeMap::new(),
            categories: CategoryHierarchy::default(),
        }
    }

    pub fn description(&self, package: &str) -> Option<&str> {
        self.descriptions.get(package).map(String::as_str)
    }
}

fn group(children: Vec<(&str, CategoryNode)>, packages: &[&str]) -> CategoryNode {
    CategoryNode::Group {
        children: children
            .into_iter()
            .map(|(name, node)| (name.to_string(), node))
            .collect(),
        packages: packages.iter().map(|p| p.to_string()).collect(),
    }
}

impl Default for PackageCatalog {
    fn default() -> Self {
        let descriptions = BTreeMap::from([("vundo".to_string(), "可视化撤回".to_string())]);

        let roots = vec![
            ("开发环境", group(vec![], &["magit", "apheleia"])),
            (
                "mini-buffer补全",
                group(
                    vec![(
                        "vertico 套装",
                        CategoryNode::leaf(["vertico", "orderless", "embark", "consult", "marginalia"]),
                    )],
                    &["helm"],
                ),
            ),
            (
                "知识管理",
                group(
                    vec![
                        (
                            "笔记",
                            CategoryNode::leaf([
                                "org-media-note",
                                "org-annot-bridge",
                                "org",
                                "org-contrib",
                                "org-cliplink",
                            ]),
                        ),
                        (
                            "文献管理",
                            CategoryNode::leaf(["citar", "parsebib", "org-cite", "helm-bibtex"]),
                        ),
                        (
                            "GTD",
                            CategoryNode::leaf(["org-journal", "org-super-agenda", "cal-china-x"]),
                        ),
                        ("文档浏览", CategoryNode::leaf(["nov", "pdf-tools"])),
                    ],
                    &[
                        "org-sticky-header",
                        "org-rifle",
                        "helm-org",
                        "org-mru-clock",
                        "doct",
                        "rainbow-mode",
                    ],
                ),
            ),
            (
                "通用编辑",
                group(
                    vec![(
                        "snippet",
                        CategoryNode::leaf(["yasnippet", "yankpad", "xah-math-input"]),
                    )],
                    &["vundo", "expand-region"],
                ),
            ),
            (
                "straight 包安装工具",
                CategoryNode::leaf([
                    "emacsmirror-mirror",
                    "gnu-elpa-mirror",
                    "melpa",
                    "nongnu-elpa",
                    "straight",
                ]),
            ),
        ];

        Self {
            descriptions,
            categories: CategoryHierarchy::new(
                roots
                    .into_iter()
                    .map(|(name, node)| (name.to_string(), node))
                    .collect(),
            ),
        }
    }
}
