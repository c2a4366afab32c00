//! Controlled vocabularies used to type KPI cells
//!
//! Service categories follow the bio.tools tool types; target groups and
//! automation tools are the terms curated for the KPI sheet. Curators write
//! free text, so sheet values are resolved against these tables by local
//! name, with a small alias table for the category spellings used in the
//! sheet.

use crate::error::{Result, RimoError};
use crate::utils::local_name;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A vocabulary term with an English label and definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Display label, also the source of the term's local name
    pub label: String,
    /// English definition
    pub definition: String,
}

impl Term {
    /// Create a new term
    #[must_use]
    pub fn new(label: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            definition: definition.into(),
        }
    }

    /// IRI local name of the term (`Web application` -> `Web_application`)
    #[must_use]
    pub fn local_name(&self) -> String {
        local_name(&self.label)
    }
}

/// The controlled vocabularies of the ontology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Classes of service a KPI applies to
    pub service_categories: Vec<Term>,
    /// Sheet spellings mapped to one or more category labels
    pub category_aliases: IndexMap<String, Vec<String>>,
    /// Stakeholder groups requesting KPIs
    pub target_groups: Vec<Term>,
    /// Tools that can collect a KPI automatically
    pub automation_tools: Vec<Term>,
}

impl Vocabulary {
    /// Find a service category by its local name
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&Term> {
        let wanted = local_name(name);
        self.service_categories
            .iter()
            .find(|term| term.local_name() == wanted)
    }

    /// Resolve a "Service Category" cell to vocabulary terms
    ///
    /// A value naming a category directly wins over the alias table. Unknown
    /// values resolve to an empty list.
    #[must_use]
    pub fn resolve_category(&self, value: &str) -> Vec<&Term> {
        let value = value.trim();
        if let Some(term) = self.category(value) {
            return vec![term];
        }
        self.category_alias(value)
            .map(|labels| labels.iter().filter_map(|l| self.category(l)).collect())
            .unwrap_or_default()
    }

    /// Category labels an alias expands to
    #[must_use]
    pub fn category_alias(&self, value: &str) -> Option<&[String]> {
        self.category_aliases.get(value.trim()).map(Vec::as_slice)
    }

    /// Resolve one target group token
    #[must_use]
    pub fn resolve_target_group(&self, token: &str) -> Option<&Term> {
        let wanted = local_name(token);
        self.target_groups
            .iter()
            .find(|term| term.local_name() == wanted)
    }

    /// Resolve one automation tool token
    #[must_use]
    pub fn resolve_automation_tool(&self, token: &str) -> Option<&Term> {
        let wanted = local_name(token);
        self.automation_tools
            .iter()
            .find(|term| term.local_name() == wanted)
    }

    /// Check internal consistency
    ///
    /// # Errors
    ///
    /// Returns `RimoError::ConfigError` if an alias points to an undeclared
    /// category or two terms of the same table share a local name.
    pub fn check(&self) -> Result<()> {
        for (alias, labels) in &self.category_aliases {
            for label in labels {
                if self.category(label).is_none() {
                    return Err(RimoError::config(format!(
                        "category alias '{alias}' points to unknown category '{label}'"
                    )));
                }
            }
        }

        for (table, terms) in [
            ("service_categories", &self.service_categories),
            ("target_groups", &self.target_groups),
            ("automation_tools", &self.automation_tools),
        ] {
            let mut seen = std::collections::HashSet::new();
            for term in terms {
                if !seen.insert(term.local_name()) {
                    return Err(RimoError::config(format!(
                        "duplicate term '{}' in {table}",
                        term.label
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        let service_categories = vec![
            Term::new(
                "Bioinformatics portal",
                "web site providing a platform/portal to multiple resources used for research in a focused area, including biological databases, web applications, training resources and so on.",
            ),
            Term::new(
                "Command-line tool",
                "A tool with a text-based (command-line) interface.",
            ),
            Term::new(
                "Database portal",
                "A Web application, suite or workbench providing a portal to a biological database.",
            ),
            Term::new(
                "Desktop application",
                "A tool with a graphical user interface that runs on your desktop environment, e.g. on a PC or mobile device.",
            ),
            Term::new(
                "Library",
                "A collection of components that are used to construct other tools. bio.tools scope includes component libraries performing high-level bioinformatics functions but excludes lower-level programming libraries.",
            ),
            Term::new(
                "Ontology",
                "A collection of information about concepts, including terms, synonyms, descriptions etc.",
            ),
            Term::new(
                "Plug-in",
                "A software component encapsulating a set of related functions, which are not standalone, i.e. depend upon other software for its use, e.g. a Javascript widget, or a plug-in, extension add-on etc. that extends the function of some existing tool.",
            ),
            Term::new(
                "Script",
                "A tool written for some run-time environment (e.g. other applications or an OS shell) that automates the execution of tasks. Often a small program written in a general-purpose languages (e.g. Perl, Python) or some domain-specific languages (e.g. sed).",
            ),
            Term::new(
                "SPARQL endpoint",
                "A service that provides queries over an RDF knowledge base via the SPARQL query language and protocol, and returns results via HTTP.",
            ),
            Term::new(
                "Suite",
                "A collection of tools which are bundled together into a convenient toolkit. Such tools typically share related functionality, a common user interface and can exchange data conveniently. This includes collections of stand-alone command-line tools, or Web applications within a common portal.",
            ),
            Term::new(
                "Web application",
                "A tool with a graphical user interface that runs in your Web browser.",
            ),
            Term::new(
                "Web API",
                "An application programming interface (API) consisting of endpoints to a request-response message system accessible via HTTP. Includes everything from simple data-access URLs to RESTful APIs.",
            ),
            Term::new(
                "Web service",
                "An API described in a machine readable form (typically WSDL) providing programmatic access via SOAP over HTTP.",
            ),
            Term::new(
                "Workbench",
                "An application or suite with a graphical user interface, providing an integrated environment for data analysis which includes or may be extended with any number of functions or tools. Includes workflow systems, platforms, frameworks etc.",
            ),
            Term::new(
                "Workflow",
                "A set of tools which have been composed together into a pipeline of some sort. Such tools are (typically) standalone, but are composed for convenience, for instance for batch execution via some workflow engine or script.",
            ),
            Term::new(
                "Helpdesk",
                "A service providing assistance with the use of bioinformatics tools, data resources, or any other aspect of bioinformatics.",
            ),
        ];

        let category_aliases = [
            ("Web applications", vec!["Web application"]),
            ("Database", vec!["Database portal"]),
            ("Libraries / APIs", vec!["Library", "Web API"]),
            ("Support / Consulting", vec!["Helpdesk"]),
            ("Tools/ Applications", vec!["Desktop application"]),
            ("Workflows / pipelines", vec!["Workflow"]),
        ]
        .into_iter()
        .map(|(alias, labels)| {
            (
                alias.to_string(),
                labels.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

        let target_groups = vec![
            Term::new(
                "Funding Agency",
                "An organization that provides funding for research activities.",
            ),
            Term::new(
                "Service Provider",
                "An organization or individual that offers services to users or clients.",
            ),
            Term::new(
                "End User",
                "The individual or group that ultimately uses or is intended to use a product or service.",
            ),
            Term::new(
                "Network",
                "A group or system of interconnected people or organizations that collaborate or share resources.",
            ),
            Term::new(
                "Technical",
                "Individuals or teams responsible for the technical aspects of service delivery, including maintenance and support.",
            ),
        ];

        let automation_tools = vec![
            Term::new("Matomo", "An open-source web analytics platform."),
            Term::new(
                "Google Analytics",
                "A web analytics service offered by Google that tracks and reports website traffic.",
            ),
            Term::new(
                "Bioconductor",
                "An open-source software project for the analysis and comprehension of genomic data.",
            ),
            Term::new(
                "Galaxy",
                "An open, web-based platform for data-intensive biomedical research.",
            ),
            Term::new(
                "GitHub",
                "A web-based platform used for version control and collaborative software development.",
            ),
            Term::new(
                "Custom scripts",
                "User-defined scripts created for specific tasks or analyses.",
            ),
            Term::new(
                "OpenAlex",
                "An open catalog of the global research system, including publications, authors, institutions, and more.",
            ),
        ];

        Self {
            service_categories,
            category_aliases,
            target_groups,
            automation_tools,
        }
    }
}
