#[cfg(test)]
mod common;

#[cfg(test)]
mod auth_tests;

#[cfg(test)]
mod profile_tests;

#[cfg(test)]
mod court_tests;

#[cfg(test)]
mod case_tests;



#[cfg(test)]
mod child_entity_tests;

#[cfg(test)]
mod payment_tests;
