//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sexton_query::{Dir, QueryOptions};

#[derive(Parser, Debug)]
#[command(
    name = "sexton",
    version,
    about = "Filter, sort and paginate a JSON collection"
)]
pub struct Cli {
    /// JSON array to query; reads stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Query options document (YAML for .yaml/.yml, JSON otherwise)
    #[arg(long, value_name = "FILE")]
    pub options: Option<PathBuf>,

    /// Free-text search
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Field to search; repeat for several
    #[arg(short = 'f', long = "field", value_name = "NAME")]
    pub fields: Vec<String>,

    /// Field to sort by
    #[arg(long, value_name = "NAME")]
    pub sort: Option<String>,

    /// Sort direction
    #[arg(long, value_name = "DIR", conflicts_with = "desc")]
    pub dir: Option<Dir>,

    /// Shorthand for --dir desc
    #[arg(long)]
    pub desc: bool,

    /// Page to show (1-indexed; out-of-range pages are clamped)
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,

    /// Items per page
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Cli {
    /// Applies command-line overrides on top of `base`.
    pub fn query_options(&self, base: QueryOptions) -> QueryOptions {
        let mut options = base;
        if let Some(search) = &self.search {
            options.search_text = search.clone();
        }
        if !self.fields.is_empty() {
            options.search_fields = self.fields.clone();
        }
        if let Some(field) = &self.sort {
            options.sort_field = Some(field.clone());
        }
        if self.desc {
            options.sort_direction = Dir::Desc;
        } else if let Some(dir) = self.dir {
            options.sort_direction = dir;
        }
        if let Some(page) = self.page {
            options.page = page;
        }
        if let Some(page_size) = self.page_size {
            options.page_size = page_size;
        }
        options
    }

    /// The input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sexton").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_base_options() {
        let cli = parse(&[
            "events.json",
            "--search",
            "choir",
            "-f",
            "title",
            "-f",
            "location",
            "--sort",
            "startsAt",
            "--desc",
            "--page",
            "-2",
            "--page-size",
            "5",
        ]);
        let base = QueryOptions::new().search("ignored").page_size(50);
        let options = cli.query_options(base);

        assert_eq!(options.search_text, "choir");
        assert_eq!(options.search_fields, vec!["title", "location"]);
        assert_eq!(options.sort_field.as_deref(), Some("startsAt"));
        assert_eq!(options.sort_direction, Dir::Desc);
        assert_eq!(options.page, -2);
        assert_eq!(options.page_size, 5);
    }

    #[test]
    fn unset_flags_keep_base() {
        let cli = parse(&[]);
        let base = QueryOptions::new().search("kept").order_desc("title").page(3);
        assert_eq!(cli.query_options(base.clone()), base);
        assert!(cli.input_path().is_none());
        assert_eq!(cli.format, Format::Json);
    }

    #[test]
    fn dir_flag_parses() {
        let cli = parse(&["--dir", "desc", "--format", "yaml"]);
        assert_eq!(cli.dir, Some(Dir::Desc));
        assert_eq!(cli.format, Format::Yaml);
    }

    #[test]
    fn bad_dir_is_rejected() {
        assert!(Cli::try_parse_from(["sexton", "--dir", "sideways"]).is_err());
    }

    #[test]
    fn dash_means_stdin() {
        assert!(parse(&["-"]).input_path().is_none());
        assert!(parse(&["events.json"]).input_path().is_some());
    }
}
