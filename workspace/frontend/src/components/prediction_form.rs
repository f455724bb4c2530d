use std::rc::Rc;

use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::api_client::prediction::HttpBackend;
use crate::controller::{self, FormInputs, SelectOption, SubmitOutcome};
use crate::ui::alert::show_alert;

/// Class carried by the result box while no prediction is shown
pub const RESULT_HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub options: Vec<SelectOption>,
    pub inputs: FormInputs,
    /// Text of the result box, `None` while it is hidden
    pub result: Option<String>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            options: controller::loading_options(),
            inputs: FormInputs::default(),
            result: None,
        }
    }
}

pub enum FormAction {
    FacilitiesLoaded(Vec<SelectOption>),
    SymptomDate(String),
    NotificationDate(String),
    InvestigationDate(String),
    Facility(String),
    Outcome(SubmitOutcome),
    Reset,
}

impl Reducible for FormState {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            FormAction::FacilitiesLoaded(options) => next.options = options,
            FormAction::SymptomDate(value) => next.inputs.symptom_date = value,
            FormAction::NotificationDate(value) => next.inputs.notification_date = value,
            FormAction::InvestigationDate(value) => next.inputs.investigation_date = value,
            FormAction::Facility(value) => next.inputs.facility = value,
            FormAction::Outcome(SubmitOutcome::Predicted(days)) => {
                next.result = Some(controller::result_text(days));
            }
            // Failures are reported through alerts and leave the page as it was
            FormAction::Outcome(_) => return self,
            FormAction::Reset => {
                next.inputs = FormInputs::default();
                next.result = None;
            }
        }
        Rc::new(next)
    }
}

fn date_field(id: &'static str, label: &'static str, value: &str, oninput: Callback<InputEvent>) -> Html {
    html! {
        <div class="form-control">
            <label class="label"><span class="label-text">{label}</span></label>
            <input
                type="date"
                id={id}
                class="input input-bordered w-full"
                value={value.to_string()}
                {oninput}
            />
        </div>
    }
}

fn date_input_callback(
    dispatcher: UseReducerDispatcher<FormState>,
    action: fn(String) -> FormAction,
) -> Callback<InputEvent> {
    Callback::from(move |e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        dispatcher.dispatch(action(input.value()));
    })
}

#[function_component(PredictionForm)]
pub fn prediction_form() -> Html {
    let state = use_reducer(FormState::default);

    // Fetch facilities once on mount
    {
        let dispatcher = state.dispatcher();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                log::debug!("Loading facility options");
                let options = controller::load_facility_options(&HttpBackend).await;
                dispatcher.dispatch(FormAction::FacilitiesLoaded(options));
            });
            || ()
        });
    }

    let on_submit = {
        let state = state.clone();
        Callback::from(move |_: MouseEvent| {
            let inputs = state.inputs.clone();
            let dispatcher = state.dispatcher();
            log::debug!("User submitted prediction form");

            wasm_bindgen_futures::spawn_local(async move {
                let outcome = controller::submit_prediction(&HttpBackend, &inputs).await;
                if let Some(message) = outcome.alert_message() {
                    show_alert(&message);
                }
                dispatcher.dispatch(FormAction::Outcome(outcome));
            });
        })
    };

    let on_reset = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| {
            log::debug!("User reset prediction form");
            dispatcher.dispatch(FormAction::Reset);
        })
    };

    let on_facility_change = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(FormAction::Facility(select.value()));
        })
    };

    let inputs = &state.inputs;

    html! {
        <div class="card bg-base-100 shadow max-w-xl mx-auto">
            <div class="card-body space-y-4">
                <h2 class="card-title">{"Dengue case closure forecast"}</h2>

                {date_field(
                    "dataSintoma",
                    "First symptoms",
                    &inputs.symptom_date,
                    date_input_callback(state.dispatcher(), FormAction::SymptomDate),
                )}
                {date_field(
                    "dataNotificacao",
                    "Notification",
                    &inputs.notification_date,
                    date_input_callback(state.dispatcher(), FormAction::NotificationDate),
                )}
                {date_field(
                    "dataInvestigacao",
                    "Investigation",
                    &inputs.investigation_date,
                    date_input_callback(state.dispatcher(), FormAction::InvestigationDate),
                )}

                <div class="form-control">
                    <label class="label"><span class="label-text">{"Facility"}</span></label>
                    <select id="unidadeSelect" class="select select-bordered w-full" onchange={on_facility_change}>
                        { for state.options.iter().map(|option| {
                            html! {
                                <option
                                    value={option.value.clone()}
                                    selected={option.value == inputs.facility}
                                >
                                    {&option.label}
                                </option>
                            }
                        })}
                    </select>
                </div>

                <div class="card-actions justify-end">
                    <button type="button" id="resetBtn" class="btn" onclick={on_reset}>{"Reset"}</button>
                    <button type="button" id="submitBtn" class="btn btn-primary" onclick={on_submit}>{"Predict"}</button>
                </div>

                <div
                    id="resultBox"
                    class={classes!("alert", "alert-info", state.result.is_none().then_some(RESULT_HIDDEN_CLASS))}
                >
                    {state.result.clone().unwrap_or_default()}
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{FACILITY_LOAD_ERROR, FACILITY_LOADING, FACILITY_PLACEHOLDER};

    fn apply(state: FormState, actions: Vec<FormAction>) -> FormState {
        let mut state = Rc::new(state);
        for action in actions {
            state = state.reduce(action);
        }
        (*state).clone()
    }

    fn filled_form() -> Vec<FormAction> {
        vec![
            FormAction::SymptomDate("2024-01-01".to_string()),
            FormAction::NotificationDate("2024-01-05".to_string()),
            FormAction::InvestigationDate("2024-01-15".to_string()),
            FormAction::Facility("A".to_string()),
        ]
    }

    #[test]
    fn test_initial_state_is_loading_and_hidden() {
        let state = FormState::default();
        assert_eq!(state.options, vec![SelectOption::placeholder(FACILITY_LOADING)]);
        assert_eq!(state.result, None);
    }

    #[test]
    fn test_loaded_facilities_replace_dropdown() {
        let options = vec![
            SelectOption::placeholder(FACILITY_PLACEHOLDER),
            SelectOption::facility("A".to_string()),
            SelectOption::facility("B".to_string()),
        ];
        let state = apply(
            FormState::default(),
            vec![FormAction::FacilitiesLoaded(options.clone())],
        );
        assert_eq!(state.options, options);

        let state = apply(
            state,
            vec![FormAction::FacilitiesLoaded(vec![SelectOption::placeholder(FACILITY_LOAD_ERROR)])],
        );
        assert_eq!(state.options.len(), 1);
    }

    #[test]
    fn test_prediction_reveals_result() {
        let mut actions = filled_form();
        actions.push(FormAction::Outcome(SubmitOutcome::Predicted(7.26)));

        let state = apply(FormState::default(), actions);
        assert_eq!(state.result.as_deref(), Some("predicted days until closure: 7.3"));
    }

    #[test]
    fn test_rejection_keeps_result_hidden() {
        let mut actions = filled_form();
        actions.push(FormAction::Outcome(SubmitOutcome::Rejected("bad unit".to_string())));

        let state = apply(FormState::default(), actions);
        assert_eq!(state.result, None);
        assert_eq!(state.inputs.facility, "A");
    }

    #[test]
    fn test_last_prediction_wins() {
        let state = apply(
            FormState::default(),
            vec![
                FormAction::Outcome(SubmitOutcome::Predicted(3.0)),
                FormAction::Outcome(SubmitOutcome::Predicted(5.44)),
            ],
        );
        assert_eq!(state.result.as_deref(), Some("predicted days until closure: 5.4"));
    }

    #[test]
    fn test_reset_clears_inputs_and_hides_result() {
        let options = vec![
            SelectOption::placeholder(FACILITY_PLACEHOLDER),
            SelectOption::facility("A".to_string()),
        ];
        let mut actions = vec![FormAction::FacilitiesLoaded(options.clone())];
        actions.extend(filled_form());
        actions.push(FormAction::Outcome(SubmitOutcome::Predicted(7.26)));
        actions.push(FormAction::Reset);

        let state = apply(FormState::default(), actions);
        assert_eq!(state.inputs, FormInputs::default());
        assert_eq!(state.result, None);
        assert_eq!(state.options, options);
    }
}
