mod properties;
mod scenarios;
mod simulated_bout;
mod support;
