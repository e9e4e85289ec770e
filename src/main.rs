mod args;

use args::{Args, Commands, FilterArgs, KernArgs, Proof, ProofArgs, TabOutput, WordsArgs};
use clap::{ArgMatches, CommandFactory, FromArgMatches};
use glyphsmith::{
    filters::{cli_to_filter, FontFilter, GlyphSelection},
    kerning::{GenerationRequest, KerningConfig, KerningStringMaker, SecondarySelection},
    open_tabs, proofs,
    wordfilter::WordFilter,
    DirectoryTabs, GlyphsmithError, StdoutTabs, TabSink,
};
use std::collections::HashMap;

fn main() {
    let command = Args::command().mut_subcommand("filter", glyphsmith::filters::filter_group);
    let matches = command.get_matches();
    let args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    env_logger::Builder::new()
        .filter_level(args.verbosity.into())
        .init();

    let result = match args.command {
        Commands::Kern(kern) => run_kern(kern),
        Commands::Filter(filter) => match matches.subcommand_matches("filter") {
            Some(filter_matches) => run_filters(filter, filter_matches),
            None => Ok(()),
        },
        Commands::Proof(proof) => run_proof(proof),
        Commands::Words(words) => run_words(words),
    };
    if let Err(e) = result {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn tab_sink(output: &TabOutput, prefix: &str) -> Box<dyn TabSink> {
    match &output.output_dir {
        Some(dir) => Box::new(DirectoryTabs::new(dir, prefix)),
        None => Box::new(StdoutTabs::new()),
    }
}

fn run_kern(args: KernArgs) -> Result<(), GlyphsmithError> {
    let config = match &args.config {
        Some(path) => KerningConfig::load(path)?,
        None => KerningConfig::default(),
    };
    log::info!("Loading {}", args.font);
    let font = glyphsmith::load(&args.font)?;
    let mut request = GenerationRequest::new(
        args.script,
        args.primary,
        args.against.iter().copied().map(SecondarySelection::new).collect(),
    );
    request.ordering = args.ordering;
    request.layout = args.layout;
    let mut sink = tab_sink(&args.output, "kern");
    let count = KerningStringMaker::new(&config).run(&request, &font, sink.as_mut())?;
    log::info!("Opened {} tab(s)", count);
    Ok(())
}

// Clap stores --foo 1 --bar 2 --foo 3 as "foo": ["1", "3"], "bar": ["2"],
// losing the order; the raw occurrences of the "filters" group get it back.
fn filters_in_order(matches: &ArgMatches) -> Result<Vec<Box<dyn FontFilter>>, GlyphsmithError> {
    let mut filters: Vec<Box<dyn FontFilter>> = vec![];
    let Some(filter_group) = matches.get_raw("filters") else {
        return Ok(filters);
    };
    let mut counter: HashMap<String, usize> = HashMap::new();
    for filter in filter_group {
        let name = filter.to_string_lossy().to_string();
        let count = counter.entry(name.clone()).or_insert(0);
        let value = matches
            .get_raw_occurrences(&name)
            .and_then(|mut occurrences| occurrences.nth(*count))
            .map(|values| values.map(|v| v.to_string_lossy()).collect::<String>())
            .unwrap_or_default();
        *count += 1;
        filters.push(cli_to_filter(&name, &value)?);
    }
    Ok(filters)
}

fn run_filters(args: FilterArgs, matches: &ArgMatches) -> Result<(), GlyphsmithError> {
    let filters = filters_in_order(matches)?;
    let selection = if args.glyphs.is_empty() {
        GlyphSelection::All
    } else {
        GlyphSelection::Named(args.glyphs.clone())
    };
    log::info!("Loading {}", args.input);
    let mut font = glyphsmith::load(&args.input)?;
    if filters.is_empty() {
        log::warn!("No filters given");
    }
    for mut filter in filters {
        filter.select(&selection);
        filter.apply(&mut font)?;
    }
    log::info!("Saving {}", args.output);
    font.save(&args.output)
}

fn run_proof(args: ProofArgs) -> Result<(), GlyphsmithError> {
    log::info!("Loading {}", args.font);
    let font = glyphsmith::load(&args.font)?;
    let (prefix, tabs) = match &args.proof {
        Proof::Currency => ("currency", proofs::currency_tabs(&font)),
        Proof::Alphabet { glyphs, alphabet } => (
            "alphabet",
            vec![proofs::alongside_alphabet(
                &font,
                &GlyphSelection::Named(glyphs.clone()),
                alphabet,
            )],
        ),
        Proof::DiacriticSpecimen => ("diacritics", vec![proofs::diacritic_specimen(&font)]),
        Proof::Diacritics => ("diacritics", proofs::diacritic_tabs(&font)),
        Proof::Sidebearings { master } => (
            "sidebearings",
            vec![proofs::unsynced_sidebearings(&font, master.as_deref())?],
        ),
        Proof::LiveStrokes => ("strokes", proofs::live_stroke_tabs(&font)),
    };
    if tabs.is_empty() {
        log::warn!("Nothing to show");
    }
    let mut sink = tab_sink(&args.output, prefix);
    open_tabs(sink.as_mut(), &tabs)
}

fn run_words(args: WordsArgs) -> Result<(), GlyphsmithError> {
    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path).map_err(|source| GlyphsmithError::FileIO {
            path: path.clone(),
            source,
        })?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let filter = WordFilter::new(args.characters, args.mode).case_sensitive(args.case_sensitive);
    println!("{}", filter.filter(&text));
    Ok(())
}
