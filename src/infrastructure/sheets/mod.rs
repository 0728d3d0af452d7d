pub mod sheet_fetcher_reqwest;
