pub mod appeal;
pub mod audit;
pub mod bail;
pub mod case;
pub mod case_history;
pub mod court;
pub mod decision;
pub mod document;
pub mod evidence;
pub mod hearing;
pub mod payment;
pub mod profile;
pub mod remand;
pub mod session;
pub mod surety;
pub mod user;
pub mod witness;
