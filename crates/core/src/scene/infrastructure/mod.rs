pub mod indexer_insights;
