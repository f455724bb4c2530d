pub mod prediction_form;
