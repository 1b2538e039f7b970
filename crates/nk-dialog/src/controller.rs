//! Intent-keyed dialog state machine.
//!
//! States are implicit in which [`SessionState`] fields are populated (see
//! [`Phase`]). Every handler either returns a reply for the updated state or,
//! on failure, an error reply with the state untouched and a reprompt for the
//! last phase that was reached.

use crate::envelope::{DialogRequest, DialogResponse, RequestType};
use crate::intent::{slot, Intent};
use crate::render::{render_condition, render_itinerary};
use chrono::{DateTime, FixedOffset};
use nk_core::config::TransitConfig;
use nk_core::{now_jst, Direction, Itinerary, MessageKey, Messages, NkError, QueryInput};
use nk_session::{merge, Phase, SessionState};
use nk_transit::{AdjacencyNavigator, Notifier, PageFetcher, RouteSearch};
use std::sync::Arc;
use tracing::Instrument;

type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// What a handler decided to say.
struct Reply {
    title: String,
    speech: String,
    reprompt: Option<String>,
    end_session: bool,
}

impl Reply {
    fn new(title: impl Into<String>, speech: impl Into<String>, reprompt: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            speech: speech.into(),
            reprompt: Some(reprompt.into()),
            end_session: false,
        }
    }

    fn ending(title: impl Into<String>, speech: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            speech: speech.into(),
            reprompt: None,
            end_session: true,
        }
    }
}

pub struct DialogController {
    search: RouteSearch,
    navigator: AdjacencyNavigator,
    notifier: Arc<dyn Notifier>,
    messages: Messages,
    clock: Clock,
}

impl DialogController {
    pub fn new(fetcher: Arc<dyn PageFetcher>, notifier: Arc<dyn Notifier>, config: &TransitConfig) -> Self {
        Self {
            search: RouteSearch::new(fetcher.clone(), config),
            navigator: AdjacencyNavigator::new(fetcher, config),
            notifier,
            messages: Messages::default(),
            clock: Arc::new(now_jst),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Replace the source of "now" used for relative durations.
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<FixedOffset> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Handle one turn. Never fails: every error becomes spoken text.
    pub async fn handle(&self, request: DialogRequest) -> DialogResponse {
        let session_id = request.session.session_id.clone().unwrap_or_default();
        let intent_name = request.intent_name.clone().unwrap_or_default();
        let span = tracing::info_span!("dialog_turn", session = %session_id, intent = %intent_name);
        self.turn(request).instrument(span).await
    }

    async fn turn(&self, request: DialogRequest) -> DialogResponse {
        let mut state = match SessionState::from_attributes(&request.session.attributes) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed session attributes");
                SessionState::new()
            }
        };
        let before = state.phase();

        let reply = match request.request_type {
            RequestType::Launch => self.welcome(),
            RequestType::SessionEnded => Reply::ending("Session Ended", ""),
            RequestType::Intent => {
                let intent = Intent::from_name(request.intent_name.as_deref().unwrap_or_default());
                self.dispatch(&intent, &request, &mut state).await
            }
        };

        tracing::info!(from = %before, to = %state.phase(), end = reply.end_session, "turn complete");
        DialogResponse {
            title: reply.title,
            spoken_text: reply.speech,
            reprompt_text: reply.reprompt,
            should_end_session: reply.end_session,
            session_attributes: state.to_attributes(),
        }
    }

    async fn dispatch(&self, intent: &Intent, request: &DialogRequest, state: &mut SessionState) -> Reply {
        match intent {
            Intent::SetStation => self.set_station(request, state),
            Intent::SetDateTime => self.set_date_time(request, state).await,
            Intent::Next => self.navigate(state, Direction::Next, intent).await,
            Intent::Previous => self.navigate(state, Direction::Previous, intent).await,
            Intent::Repeat => self.repeat(state),
            Intent::CheckCondition => self.check_condition(state),
            Intent::Notify => self.notify(state).await,
            Intent::Help => self.welcome(),
            Intent::Stop | Intent::Cancel => Reply::ending("Session Ended", self.msg(MessageKey::Exit)),
            Intent::Unknown(name) => {
                let err = NkError::UnknownIntent(name.clone());
                tracing::warn!(error = %err, "ending session");
                Reply::ending("Error Exit", self.msg(MessageKey::ErrorExit))
            }
        }
    }

    fn msg(&self, key: MessageKey) -> String {
        self.messages.get(key).to_string()
    }

    fn welcome(&self) -> Reply {
        Reply::new("Welcome", self.msg(MessageKey::Welcome), self.msg(MessageKey::WelcomeReprompt))
    }

    /// Error reply that reprompts for whatever the state still needs.
    fn failure(&self, title: &str, state: &SessionState) -> Reply {
        let reprompt = match state.phase() {
            Phase::NoStations => MessageKey::Welcome,
            Phase::StationsOnly => MessageKey::AskDateTime,
            Phase::HasItinerary => MessageKey::Retry,
        };
        Reply::new(title, self.msg(MessageKey::Error), self.msg(reprompt))
    }

    fn set_station(&self, request: &DialogRequest, state: &mut SessionState) -> Reply {
        let title = Intent::SetStation.name();
        match (request.slot(slot::STATION_FROM), request.slot(slot::STATION_TO)) {
            (Some(from), Some(to)) => {
                state.set_stations(from, to);
                tracing::info!(%from, %to, "stations set");
                Reply::new(title, self.msg(MessageKey::AskDateTime), self.msg(MessageKey::AskDateTimeReprompt))
            }
            _ => Reply::new(title, self.msg(MessageKey::Error), self.msg(MessageKey::Welcome)),
        }
    }

    async fn set_date_time(&self, request: &DialogRequest, state: &mut SessionState) -> Reply {
        let title = Intent::SetDateTime.name();
        let Some((from, to)) = state.criteria.stations() else {
            return Reply::new(title, self.msg(MessageKey::Welcome), self.msg(MessageKey::WelcomeReprompt));
        };

        let input = QueryInput {
            departure_station: from.to_string(),
            arrival_station: to.to_string(),
            date: request.slot(slot::DATE).map(String::from),
            time: request.slot(slot::TIME).map(String::from),
            duration: request.slot(slot::DURATION).map(String::from),
            mode: request.slot(slot::TYPE).map(String::from),
        };

        let outcome = self.search.search(&input, (self.clock)()).await.map(|it| self.rendered(it));
        match merge(state, outcome) {
            Ok(()) => self.speak_result(title, state),
            Err(e) => {
                tracing::warn!(error = %e, "search failed");
                Reply::new(title, self.msg(MessageKey::Error), self.msg(MessageKey::AskDateTime))
            }
        }
    }

    async fn navigate(&self, state: &mut SessionState, direction: Direction, intent: &Intent) -> Reply {
        let title = intent.name();
        let Some(url) = state.source_url().map(String::from) else {
            return self.failure(title, state);
        };

        let outcome = self.navigator.navigate(&url, direction).await.map(|(fragment, new_url)| {
            self.rendered(Itinerary::from_fragment(fragment, state.criteria.clone(), new_url))
        });
        match merge(state, outcome) {
            Ok(()) => self.speak_result(title, state),
            Err(e) => {
                tracing::warn!(error = %e, ?direction, "adjacent search failed");
                self.failure(title, state)
            }
        }
    }

    fn rendered(&self, itinerary: Itinerary) -> (Itinerary, String) {
        let speech = render_itinerary(&self.messages, &itinerary);
        (itinerary, speech)
    }

    /// Speak the result that was just merged into `state`.
    fn speak_result(&self, title: &str, state: &SessionState) -> Reply {
        let speech = state.last_rendered_message.clone().unwrap_or_default();
        Reply::new(title, speech, self.msg(MessageKey::AfterResult))
    }

    fn repeat(&self, state: &SessionState) -> Reply {
        let title = Intent::Repeat.name();
        match &state.last_rendered_message {
            Some(message) => Reply::new(title, message.clone(), self.msg(MessageKey::AfterResult)),
            None => self.failure(title, state),
        }
    }

    fn check_condition(&self, state: &SessionState) -> Reply {
        let reprompt = match state.phase() {
            Phase::NoStations => MessageKey::WelcomeReprompt,
            Phase::StationsOnly => MessageKey::AskDateTime,
            Phase::HasItinerary => MessageKey::AfterResult,
        };
        Reply::new(
            Intent::CheckCondition.name(),
            render_condition(&self.messages, state),
            self.msg(reprompt),
        )
    }

    async fn notify(&self, state: &SessionState) -> Reply {
        let title = Intent::Notify.name();
        let (Some(message), Some(url)) = (state.last_rendered_message.as_deref(), state.source_url()) else {
            return Reply::new(title, self.msg(MessageKey::Welcome), self.msg(MessageKey::WelcomeReprompt));
        };

        match self.notifier.notify(message, url).await {
            Ok(()) => Reply::new(title, self.msg(MessageKey::Notified), self.msg(MessageKey::AfterResult)),
            Err(e) => {
                tracing::warn!(error = %e, "notification failed, ending session");
                Reply {
                    title: title.to_string(),
                    speech: self.msg(MessageKey::NotifyFailed),
                    reprompt: Some(self.msg(MessageKey::ErrorExit)),
                    end_session: true,
                }
            }
        }
    }
}
