// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory model of a PPD's option groups, options and choices, with the
// "marked" state a print dialog manipulates before writing the PPD back out.
//
// Parsing a PPD into this structure is the CUPS library's job; callers build
// the model from whatever the parser gave them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cupskit_core::error::{CupskitError, Result};

/// How an option is presented and how many choices may be marked at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UiKind {
    /// True/False option.
    Boolean,
    /// Exactly one choice.
    #[default]
    PickOne,
    /// Any number of choices.
    PickMany,
}

/// A single choice of an option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Machine keyword, e.g. `A4`.
    pub choice: String,
    /// Human readable label, e.g. `A4 (210 x 297 mm)`.
    pub text: String,
    /// Currently selected.
    #[serde(default)]
    pub marked: bool,
}

/// A PPD option such as `PageSize` or `Duplex`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpdOption {
    pub keyword: String,
    pub text: String,
    /// The choice named by the option's `*Default` line.
    pub default_choice: String,
    #[serde(default)]
    pub ui: UiKind,
    pub choices: Vec<Choice>,
}

impl PpdOption {
    pub fn new(keyword: impl Into<String>, default_choice: impl Into<String>) -> Self {
        let keyword = keyword.into();
        Self {
            text: keyword.clone(),
            keyword,
            default_choice: default_choice.into(),
            ui: UiKind::default(),
            choices: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_ui(mut self, ui: UiKind) -> Self {
        self.ui = ui;
        self
    }

    /// Append an unmarked choice.
    pub fn choice(mut self, choice: impl Into<String>, text: impl Into<String>) -> Self {
        self.choices.push(Choice {
            choice: choice.into(),
            text: text.into(),
            marked: false,
        });
        self
    }

    /// The first marked choice, if any.
    pub fn marked_choice(&self) -> Option<&Choice> {
        self.choices.iter().find(|c| c.marked)
    }

    /// Whether the first marked choice differs from the default.
    fn nondefault_marked(&self) -> bool {
        self.marked_choice()
            .is_some_and(|c| c.choice != self.default_choice)
    }

    fn clear_marks(&mut self) {
        for c in &mut self.choices {
            c.marked = false;
        }
    }
}

/// A named group of options, possibly with subgroups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub text: String,
    pub options: Vec<PpdOption>,
    #[serde(default)]
    pub subgroups: Vec<Group>,
}

impl Group {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            options: Vec::new(),
            subgroups: Vec::new(),
        }
    }

    pub fn option(mut self, option: PpdOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn subgroup(mut self, group: Group) -> Self {
        self.subgroups.push(group);
        self
    }

    fn collect<'a>(&'a self, out: &mut Vec<&'a PpdOption>) {
        out.extend(self.options.iter());
        for sg in &self.subgroups {
            sg.collect(out);
        }
    }

    fn find_mut(&mut self, keyword: &str) -> Option<&mut PpdOption> {
        if let Some(i) = self
            .options
            .iter()
            .position(|o| o.keyword.eq_ignore_ascii_case(keyword))
        {
            return self.options.get_mut(i);
        }
        self.subgroups.iter_mut().find_map(|sg| sg.find_mut(keyword))
    }

    fn for_each_mut(&mut self, f: &mut dyn FnMut(&mut PpdOption)) {
        for o in &mut self.options {
            f(o);
        }
        for sg in &mut self.subgroups {
            sg.for_each_mut(f);
        }
    }

    fn nondefaults_marked(&self) -> bool {
        self.options.iter().any(PpdOption::nondefault_marked)
            || self.subgroups.iter().any(Group::nondefaults_marked)
    }
}

/// A `*UIConstraints` entry: `option1`/`choice1` cannot be combined with
/// `option2`/`choice2`. An empty choice stands for any choice other than
/// `None`, `Off` or `False`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub option1: String,
    #[serde(default)]
    pub choice1: String,
    pub option2: String,
    #[serde(default)]
    pub choice2: String,
}

impl Constraint {
    pub fn new(
        option1: impl Into<String>,
        choice1: impl Into<String>,
        option2: impl Into<String>,
        choice2: impl Into<String>,
    ) -> Self {
        Self {
            option1: option1.into(),
            choice1: choice1.into(),
            option2: option2.into(),
            choice2: choice2.into(),
        }
    }

    /// Whether either side names option `keyword` (ASCII case-insensitive).
    pub fn involves(&self, keyword: &str) -> bool {
        self.option1.eq_ignore_ascii_case(keyword) || self.option2.eq_ignore_ascii_case(keyword)
    }
}

/// All option groups of one PPD, with its constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub groups: Vec<Group>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl OptionSet {
    pub fn new(groups: Vec<Group>) -> Self {
        Self {
            groups,
            constraints: Vec::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Constraints naming option `keyword` on either side, in file order.
    ///
    /// Only exposes the table; deciding whether the marked state conflicts
    /// is left to CUPS.
    pub fn constraints_for(&self, keyword: &str) -> Vec<&Constraint> {
        self.constraints.iter().filter(|c| c.involves(keyword)).collect()
    }

    /// Every option, groups first then their subgroups, in file order.
    pub fn options(&self) -> Vec<&PpdOption> {
        let mut out = Vec::new();
        for g in &self.groups {
            g.collect(&mut out);
        }
        out
    }

    /// Look up an option by keyword (ASCII case-insensitive).
    pub fn find_option(&self, keyword: &str) -> Option<&PpdOption> {
        self.options()
            .into_iter()
            .find(|o| o.keyword.eq_ignore_ascii_case(keyword))
    }

    fn find_option_mut(&mut self, keyword: &str) -> Option<&mut PpdOption> {
        self.groups.iter_mut().find_map(|g| g.find_mut(keyword))
    }

    /// Mark every option's default choice and nothing else.
    pub fn mark_defaults(&mut self) {
        let mut count = 0usize;
        for g in &mut self.groups {
            g.for_each_mut(&mut |o: &mut PpdOption| {
                let default = o.default_choice.clone();
                for c in &mut o.choices {
                    c.marked = c.choice == default;
                }
                count += 1;
            });
        }
        debug!(options = count, "marked defaults");
    }

    /// Mark `choice` of option `keyword`.
    ///
    /// For single-choice options the other choices are unmarked. Page size
    /// and page region are mutually exclusive: marking one clears the other.
    pub fn mark_option(&mut self, keyword: &str, choice: &str) -> Result<()> {
        let option = self
            .find_option_mut(keyword)
            .ok_or_else(|| CupskitError::UnknownOption(keyword.to_string()))?;

        let idx = option
            .choices
            .iter()
            .position(|c| c.choice.eq_ignore_ascii_case(choice))
            .ok_or_else(|| CupskitError::UnknownChoice {
                option: keyword.to_string(),
                choice: choice.to_string(),
            })?;

        if option.ui != UiKind::PickMany {
            option.clear_marks();
        }
        option.choices[idx].marked = true;
        info!(option = %option.keyword, choice = %option.choices[idx].choice, "option marked");

        let exclusive = if keyword.eq_ignore_ascii_case("PageSize") {
            Some("PageRegion")
        } else if keyword.eq_ignore_ascii_case("PageRegion") {
            Some("PageSize")
        } else {
            None
        };
        if let Some(other) = exclusive.and_then(|k| self.find_option_mut(k)) {
            other.clear_marks();
        }
        Ok(())
    }

    /// The marked choice of option `keyword`, if the option exists and has
    /// one.
    pub fn find_marked_choice(&self, keyword: &str) -> Option<&Choice> {
        self.find_option(keyword).and_then(PpdOption::marked_choice)
    }

    /// Whether any option currently has a non-default choice marked.
    pub fn nondefaults_marked(&self) -> bool {
        self.groups.iter().any(Group::nondefaults_marked)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A small laser printer PPD: page setup, a finishing subgroup, and a
    /// pick-many option.
    pub(crate) fn laser_options() -> OptionSet {
        OptionSet::new(vec![
            Group::new("General", "General")
                .option(
                    PpdOption::new("PageSize", "Letter")
                        .with_text("Media Size")
                        .choice("Letter", "US Letter")
                        .choice("A4", "A4"),
                )
                .option(
                    PpdOption::new("PageRegion", "Letter")
                        .choice("Letter", "US Letter")
                        .choice("A4", "A4"),
                )
                .option(
                    PpdOption::new("Duplex", "None")
                        .choice("None", "Off")
                        .choice("DuplexNoTumble", "Long Edge"),
                )
                .subgroup(
                    Group::new("Finishing", "Finishing").option(
                        PpdOption::new("Staple", "False")
                            .with_ui(UiKind::Boolean)
                            .choice("True", "Yes")
                            .choice("False", "No"),
                    ),
                ),
            Group::new("Extra", "Extra").option(
                PpdOption::new("Trays", "Tray1")
                    .with_ui(UiKind::PickMany)
                    .choice("Tray1", "Tray 1")
                    .choice("Tray2", "Tray 2"),
            ),
        ])
    }

    #[test]
    fn constraints_match_either_side() {
        let set = laser_options()
            .with_constraint(Constraint::new("Duplex", "DuplexNoTumble", "PageSize", "Env10"))
            .with_constraint(Constraint::new("Staple", "", "Duplex", "None"))
            .with_constraint(Constraint::new("Trays", "Tray2", "PageSize", "A4"));

        let duplex = set.constraints_for("duplex");
        assert_eq!(duplex.len(), 2);
        assert_eq!(duplex[0].option2, "PageSize");
        assert_eq!(duplex[1].option1, "Staple");
        assert_eq!(duplex[1].choice1, "");

        assert_eq!(set.constraints_for("PageSize").len(), 2);
        assert!(set.constraints_for("Resolution").is_empty());
    }

    #[test]
    fn constraints_default_to_empty_when_absent() {
        let json = r#"{ "groups": [] }"#;
        let set: OptionSet = serde_json::from_str(json).unwrap();
        assert!(set.constraints.is_empty());

        let json = r#"{ "groups": [], "constraints": [
            { "option1": "Duplex", "option2": "Staple", "choice2": "True" }
        ] }"#;
        let set: OptionSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.constraints_for("staple")[0].choice1, "");
    }

    fn marked(set: &OptionSet, keyword: &str) -> Option<String> {
        set.find_marked_choice(keyword).map(|c| c.choice.clone())
    }

    #[test]
    fn finds_options_in_subgroups_case_insensitively() {
        let set = laser_options();
        assert_eq!(set.find_option("staple").unwrap().keyword, "Staple");
        assert_eq!(set.find_option("PageSize").unwrap().text, "Media Size");
        assert!(set.find_option("Resolution").is_none());
        assert_eq!(set.options().len(), 5);
    }

    #[test]
    fn nothing_marked_initially() {
        let set = laser_options();
        assert_eq!(marked(&set, "PageSize"), None);
        assert!(!set.nondefaults_marked());
    }

    #[test]
    fn mark_defaults_marks_only_defaults() {
        let mut set = laser_options();
        set.mark_defaults();
        assert_eq!(marked(&set, "PageSize").as_deref(), Some("Letter"));
        assert_eq!(marked(&set, "Staple").as_deref(), Some("False"));
        assert!(!set.nondefaults_marked());
    }

    #[test]
    fn marking_a_non_default_is_detected() {
        let mut set = laser_options();
        set.mark_defaults();
        set.mark_option("Duplex", "DuplexNoTumble").unwrap();
        assert_eq!(marked(&set, "Duplex").as_deref(), Some("DuplexNoTumble"));
        assert!(set.nondefaults_marked());
    }

    #[test]
    fn non_default_in_subgroup_is_detected() {
        let mut set = laser_options();
        set.mark_defaults();
        set.mark_option("Staple", "True").unwrap();
        assert!(set.nondefaults_marked());
        set.mark_option("Staple", "False").unwrap();
        assert!(!set.nondefaults_marked());
    }

    #[test]
    fn page_size_clears_page_region() {
        let mut set = laser_options();
        set.mark_defaults();
        assert_eq!(marked(&set, "PageRegion").as_deref(), Some("Letter"));
        set.mark_option("PageSize", "a4").unwrap();
        assert_eq!(marked(&set, "PageSize").as_deref(), Some("A4"));
        assert_eq!(marked(&set, "PageRegion"), None);

        set.mark_option("PageRegion", "Letter").unwrap();
        assert_eq!(marked(&set, "PageSize"), None);
    }

    #[test]
    fn pick_many_keeps_other_marks() {
        let mut set = laser_options();
        set.mark_option("Trays", "Tray1").unwrap();
        set.mark_option("Trays", "Tray2").unwrap();
        let trays = set.find_option("Trays").unwrap();
        assert!(trays.choices.iter().all(|c| c.marked));
    }

    #[test]
    fn unknown_option_or_choice_is_an_error() {
        let mut set = laser_options();
        assert!(matches!(
            set.mark_option("Resolution", "600dpi"),
            Err(CupskitError::UnknownOption(_))
        ));
        assert!(matches!(
            set.mark_option("Duplex", "Sideways"),
            Err(CupskitError::UnknownChoice { .. })
        ));
    }
}
