use std::sync::Arc;

use binday_core::{
    CouncilId, Reply,
    bin_type::{self, BinCategory},
    guard::DeviceAddress,
    intent::{Intent, NEXT_BIN, WHEN_IS_BIN, WHICH_BIN_TOMORROW},
    service::BindayService,
};
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    IntentSelect,
    BinTypeInput,
    AnswerView,
}

/// Intent names with the label shown in the list.
pub(crate) const INTENTS: [(&str, &str); 3] = [
    (WHICH_BIN_TOMORROW, "Which bin goes out tomorrow?"),
    (NEXT_BIN, "When is the next collection?"),
    (WHEN_IS_BIN, "When is a particular bin collected?"),
];

pub(crate) struct App {
    pub service: Arc<BindayService>,
    pub council: CouncilId,
    pub consent: bool,
    pub address: Option<DeviceAddress>,
    pub reference_date: NaiveDate,

    pub screen: Screen,
    pub intent_list_index: usize,

    pub bin_type_input: String,
    pub categories: Vec<BinCategory>,

    pub reply: Option<Reply>,

    pub is_loading: bool,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(
        service: Arc<BindayService>,
        council: CouncilId,
        consent: bool,
        address: Option<DeviceAddress>,
    ) -> Self {
        Self {
            service,
            council,
            consent,
            address,
            reference_date: Local::now().date_naive(),
            screen: Screen::IntentSelect,
            intent_list_index: 0,
            bin_type_input: String::new(),
            categories: bin_type::categories()
                .filter(|category| bin_type::normalize(category.as_str()).is_some())
                .collect(),
            reply: None,
            is_loading: false,
            error_message: None,
        }
    }

    pub(crate) fn council_name(&self) -> String {
        self.service
            .councils()
            .into_iter()
            .find(|(id, _)| *id == self.council)
            .map_or_else(|| self.council.to_string(), |(_, name)| name)
    }

    fn selected_intent_name(&self) -> Option<&'static str> {
        INTENTS.get(self.intent_list_index).map(|(name, _)| *name)
    }

    /// Move on from the intent list. `WhenIsBin` needs a bin type first.
    pub(crate) fn select_current_intent(&mut self) -> Option<Intent> {
        let name = self.selected_intent_name()?;
        if name == WHEN_IS_BIN {
            self.screen = Screen::BinTypeInput;
            return None;
        }
        self.screen = Screen::AnswerView;
        Some(Intent::new(name, None))
    }

    pub(crate) fn bin_type_intent(&mut self) -> Intent {
        self.screen = Screen::AnswerView;
        let slot = Some(self.bin_type_input.trim().to_owned()).filter(|raw| !raw.is_empty());
        Intent::new(WHEN_IS_BIN, slot)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use binday_core::{PluginRegistry, ResolverOptions};

    pub(crate) fn app() -> App {
        let service = BindayService::new(
            Arc::new(PluginRegistry::new(Vec::new())),
            ResolverOptions::default(),
        );
        App::new(
            Arc::new(service),
            CouncilId("east-ayrshire".to_owned()),
            true,
            None,
        )
    }

    #[test]
    fn tomorrow_goes_straight_to_answer() {
        let mut app = app();
        let intent = app.select_current_intent().unwrap();
        assert_eq!(intent.name, WHICH_BIN_TOMORROW);
        assert_eq!(app.screen, Screen::AnswerView);
    }

    #[test]
    fn when_is_bin_asks_for_type() {
        let mut app = app();
        app.intent_list_index = 2;
        assert!(app.select_current_intent().is_none());
        assert_eq!(app.screen, Screen::BinTypeInput);

        app.bin_type_input = "  Glass ".to_owned();
        let intent = app.bin_type_intent();
        assert_eq!(intent.bin_type.as_deref(), Some("Glass"));

        app.bin_type_input.clear();
        assert_eq!(app.bin_type_intent().bin_type, None);
    }

    #[test]
    fn unknown_council_is_shown_by_id() {
        assert_eq!(app().council_name(), "east-ayrshire");
    }
}
