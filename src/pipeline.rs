//! Sequential conversion run:
//! fetch -> decompress -> parse -> (sports filter) -> shift -> serialize -> write

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ConverterConfig;
use crate::epg::{
    decompress, is_gzip, to_xml_bytes, EpgParser, FilterStats, ShiftStats, SportsFilter,
    TimeShift, TimestampPolicy, TvDocument,
};
use crate::error::{EpgError, Result};
use crate::fetch::FetchBytes;

/// Which guide to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Every channel and programme, times in WIB
    Plain,
    /// Sports channels and programmes only, times in WIB
    Sports,
}

impl Variant {
    pub fn output_file_name(&self) -> &'static str {
        match self {
            Variant::Plain => "epg_wib.xml",
            Variant::Sports => "epg_wib_sports.xml",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Plain => "plain",
            Variant::Sports => "sports",
        }
    }
}

/// Counters collected while converting one payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub gzip: bool,
    pub channels_in: usize,
    pub programmes_in: usize,
    pub channels_out: usize,
    pub programmes_out: usize,
    pub filter: Option<FilterStats>,
    pub shift: ShiftStats,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub variant: Variant,
    pub bytes_fetched: usize,
    pub bytes_written: usize,
    pub output_path: PathBuf,
    pub stats: ConversionStats,
}

/// Decompress and parse a downloaded payload
pub fn decode_document(payload: Vec<u8>) -> Result<TvDocument> {
    let xml = decompress(payload)?;
    EpgParser::parse_bytes(&xml)
}

/// Everything between the download and the output file
#[derive(Debug, Clone)]
pub struct Converter {
    variant: Variant,
    shift: TimeShift,
    filter: SportsFilter,
}

impl Converter {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            shift: TimeShift::wib(),
            filter: SportsFilter::default(),
        }
    }

    pub fn with_policy(mut self, policy: TimestampPolicy) -> Self {
        self.shift = self.shift.with_policy(policy);
        self
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Apply the filter (sports only) and the time shift to a parsed guide
    pub fn transform(&self, doc: &mut TvDocument) -> Result<(Option<FilterStats>, ShiftStats)> {
        let filter = match self.variant {
            Variant::Plain => None,
            Variant::Sports => {
                log::info!("Filtering sports channels and programmes...");
                Some(self.filter.apply(doc))
            }
        };

        log::info!("Converting programme times UTC -> WIB (+7 hours)...");
        let shift = self.shift.apply(doc)?;
        Ok((filter, shift))
    }

    /// Turn a raw (possibly gzip) payload into the output document bytes
    pub fn convert(&self, payload: Vec<u8>) -> Result<(Vec<u8>, ConversionStats)> {
        let gzip = is_gzip(&payload);
        let mut doc = decode_document(payload)?;
        let channels_in = doc.channel_count();
        let programmes_in = doc.programme_count();
        log::debug!("Parsed {} channels, {} programmes", channels_in, programmes_in);

        let (filter, shift) = self.transform(&mut doc)?;
        let xml = to_xml_bytes(&doc)?;

        let stats = ConversionStats {
            gzip,
            channels_in,
            programmes_in,
            channels_out: doc.channel_count(),
            programmes_out: doc.programme_count(),
            filter,
            shift,
        };
        Ok((xml, stats))
    }
}

/// Persist the output, replacing any existing file
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| EpgError::IoWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Full run for one variant
pub fn run(config: &ConverterConfig, converter: &Converter, fetcher: &dyn FetchBytes) -> Result<RunReport> {
    let variant = converter.variant();

    log::info!("Downloading EPG from {} ...", config.epg_url);
    let payload = fetcher.fetch_bytes(&config.epg_url)?;
    let bytes_fetched = payload.len();

    let (xml, stats) = converter.convert(payload)?;

    let output_path = config.output_dir.join(variant.output_file_name());
    write_output(&output_path, &xml)?;
    log::info!("Done -> {} ({} guide, WIB)", output_path.display(), variant.label());

    Ok(RunReport {
        variant,
        bytes_fetched,
        bytes_written: xml.len(),
        output_path,
        stats,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
