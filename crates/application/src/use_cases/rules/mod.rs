pub mod load_rules;

pub use load_rules::LoadRulesUseCase;
