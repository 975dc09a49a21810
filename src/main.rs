use log::{error, info};
use std::io::{self, Read};
use std::process;
use ticker_splitter::{
    tag_text, AliasTrie, CsvDirectorySink, Error, RecordSplitter, ThreadItemReader,
    DEFAULT_ALIAS_TRIE_CONFIG, DEFAULT_RECORD_SPLITTER_CONFIG, NEWS_ARTICLE_LAYOUT,
    REDDIT_COMMENT_LAYOUT, REDDIT_SUBMISSION_LAYOUT,
};

const USAGE: &str = "Usage:
  ticker-splitter-cli tag <search_terms.csv>            < text
  ticker-splitter-cli split-news <search_terms.csv> <articles.csv> <output_dir>
  ticker-splitter-cli split-reddit <search_terms.csv> <submissions.csv> <comments.csv> <posts_output_dir> <comments_output_dir>";

fn main() {
    // Initialize the logger
    #[cfg(feature = "logger-support")]
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Error> {
    let args: Vec<&str> = args.iter().map(|arg| arg.as_str()).collect();

    match args.as_slice() {
        ["tag", dictionary_path] => tag_stdin(dictionary_path),
        ["split-news", dictionary_path, articles_path, output_dir] => {
            split_news(dictionary_path, articles_path, output_dir)
        }
        [
            "split-reddit",
            dictionary_path,
            submissions_path,
            comments_path,
            posts_output_dir,
            comments_output_dir,
        ] => split_reddit(
            dictionary_path,
            submissions_path,
            comments_path,
            posts_output_dir,
            comments_output_dir,
        ),
        _ => {
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    }
}

fn tag_stdin(dictionary_path: &str) -> Result<(), Error> {
    let alias_trie = AliasTrie::from_path(dictionary_path, DEFAULT_ALIAS_TRIE_CONFIG)?;

    // Read the input text from stdin
    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;

    for span in tag_text(&input, "", &alias_trie) {
        println!("{}\t{:?}", span.ticker_symbol, span.text);
    }

    Ok(())
}

fn split_news(dictionary_path: &str, articles_path: &str, output_dir: &str) -> Result<(), Error> {
    let alias_trie = AliasTrie::from_path(dictionary_path, DEFAULT_ALIAS_TRIE_CONFIG)?;

    let articles = ThreadItemReader::new(NEWS_ARTICLE_LAYOUT).read_items_from_path(articles_path)?;

    let splitter = RecordSplitter::new(DEFAULT_RECORD_SPLITTER_CONFIG, &alias_trie);
    let mut sink = CsvDirectorySink::new(output_dir);

    let stats = splitter.split_articles(articles, &mut sink)?;
    info!("News split complete: {:?}", stats);

    Ok(())
}

fn split_reddit(
    dictionary_path: &str,
    submissions_path: &str,
    comments_path: &str,
    posts_output_dir: &str,
    comments_output_dir: &str,
) -> Result<(), Error> {
    let alias_trie = AliasTrie::from_path(dictionary_path, DEFAULT_ALIAS_TRIE_CONFIG)?;

    let posts =
        ThreadItemReader::new(REDDIT_SUBMISSION_LAYOUT).read_items_from_path(submissions_path)?;
    let comments =
        ThreadItemReader::new(REDDIT_COMMENT_LAYOUT).read_items_from_path(comments_path)?;

    let splitter = RecordSplitter::new(DEFAULT_RECORD_SPLITTER_CONFIG, &alias_trie);
    let mut post_sink = CsvDirectorySink::new(posts_output_dir);
    let mut comment_sink = CsvDirectorySink::new(comments_output_dir);

    let (post_stats, comment_stats) =
        splitter.split_threads(posts, comments, &mut post_sink, &mut comment_sink)?;
    info!(
        "Reddit split complete: posts {:?}, comments {:?}",
        post_stats, comment_stats
    );

    Ok(())
}
