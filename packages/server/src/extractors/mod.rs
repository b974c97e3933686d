pub mod case_study_form;
