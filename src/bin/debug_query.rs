use tibphrase::{classify, Query, DEFAULT_SOLR_URL};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let input = if args.is_empty() {
        "རྒྱལ་པོའི".to_string()
    } else {
        args.join(" ")
    };
    println!("Input: {}", input);

    let script = classify(&input);
    let query = Query::build(&input, script);

    println!("\nScript: {}", script);
    println!("Terms:");
    for (i, term) in query.terms.iter().enumerate() {
        println!("  {}: {:?} ({} chars)", i, term, term.chars().count());
    }
    println!("Lucene: {}", query.to_lucene());

    #[cfg(feature = "solr")]
    match tibphrase::solr::request_url(DEFAULT_SOLR_URL, &query) {
        Ok(url) => println!("URL: {}", url),
        Err(e) => eprintln!("Error: {}", e),
    }
    #[cfg(not(feature = "solr"))]
    println!("Base URL: {}", DEFAULT_SOLR_URL);
}
