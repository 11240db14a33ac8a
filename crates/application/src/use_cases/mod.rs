pub mod resolve;
pub mod rules;

// Re-export use cases
pub use resolve::ResolveDomainUseCase;
pub use rules::LoadRulesUseCase;
