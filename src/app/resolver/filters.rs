//! Filter stages of the resolver pipeline
//!
//! Each stage is a pure `(candidates, criterion) -> candidates` function. An
//! absent criterion passes every candidate through. All matching is plain
//! case-sensitive substring containment against the listed file name.

use crate::app::listing::DirectoryIndex;
use crate::app::models::{CycleRuntime, FileDescriptor, FileLink, ForecastRange};
use crate::errors::NotFoundError;

/// Pick the sub-directory holding one of `dates`
///
/// Dates are tried in order, so a cycle-qualified date wins over the plain
/// one. With a format, that format must list a date. Without one, formats are
/// scanned in listing order and the first that lists the date wins.
pub fn resolve_directory(
    index: &DirectoryIndex,
    format: Option<&str>,
    dates: &[&str],
) -> Result<String, NotFoundError> {
    let wanted = dates.first().copied().unwrap_or_default();

    let (format, date) = match format {
        Some(format) => {
            let listed = index
                .dates(format)
                .ok_or_else(|| NotFoundError::FormatNotListed {
                    format: format.to_string(),
                })?;
            let date = dates
                .iter()
                .find(|date| listed.iter().any(|d| d.as_str() == **date))
                .ok_or_else(|| NotFoundError::DateNotListed {
                    format: format.to_string(),
                    date: wanted.to_string(),
                })?;
            (format, *date)
        }
        None => dates
            .iter()
            .find_map(|date| index.first_format_with(date).map(|format| (format, *date)))
            .ok_or_else(|| NotFoundError::DateNotAvailable {
                date: wanted.to_string(),
            })?,
    };

    Ok(format!("{}.{}", format, date))
}

fn keep_containing(links: Vec<FileLink>, needle: Option<&str>) -> Vec<FileLink> {
    match needle {
        Some(needle) => links.into_iter().filter(|link| link.contains(needle)).collect(),
        None => links,
    }
}

/// Keep links naming the resolved catalog code
pub fn by_product_code(links: Vec<FileLink>, code: Option<&str>) -> Vec<FileLink> {
    keep_containing(links, code)
}

/// Keep links naming the resolution (e.g., "1p00")
pub fn by_resolution(links: Vec<FileLink>, resolution: Option<&str>) -> Vec<FileLink> {
    keep_containing(links, resolution)
}

/// Keep links naming the cycle token (e.g., "t18z")
pub fn by_cycle(links: Vec<FileLink>, cycle: Option<&CycleRuntime>) -> Vec<FileLink> {
    match cycle {
        Some(cycle) => keep_containing(links, Some(cycle.token().as_str())),
        None => links,
    }
}

/// Keep links naming any hour of the range as `fNNN`
pub fn by_forecast_range(links: Vec<FileLink>, range: Option<ForecastRange>) -> Vec<FileLink> {
    match range {
        Some(range) => links
            .into_iter()
            .filter(|link| range.contains_link(link))
            .collect(),
        None => links,
    }
}

/// Keep links containing the lower-cased product type
///
/// The link itself is not lower-cased, so "GFS" matches "gfs.t18z..." while a
/// link spelled "GFS.t18z..." would not.
pub fn by_product_type(links: Vec<FileLink>, product_type: Option<&str>) -> Vec<FileLink> {
    match product_type {
        Some(product_type) => keep_containing(links, Some(product_type.to_lowercase().as_str())),
        None => links,
    }
}

/// Turn the surviving links into descriptors under `directory_url`
pub fn assemble(directory_url: &str, links: &[FileLink]) -> Vec<FileDescriptor> {
    links
        .iter()
        .map(|link| FileDescriptor::from_link(directory_url, link))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Token;

    fn links(names: &[&str]) -> Vec<FileLink> {
        names.iter().map(|n| FileLink::new(*n)).collect()
    }

    fn names(links: &[FileLink]) -> Vec<&str> {
        links.iter().map(|l| l.name.as_str()).collect()
    }

    fn index(values: &[&str]) -> DirectoryIndex {
        let tokens: Vec<Token> = values.iter().map(|v| Token::new("href", *v)).collect();
        DirectoryIndex::from_tokens(&tokens)
    }

    #[test]
    fn test_resolve_directory_with_format() {
        let index = index(&["gdas.20180322/", "gfs.2018032218/"]);
        assert_eq!(
            resolve_directory(&index, Some("gfs"), &["2018032218"]).unwrap(),
            "gfs.2018032218"
        );
        assert!(matches!(
            resolve_directory(&index, Some("gfs"), &["20180322"]),
            Err(NotFoundError::DateNotListed { .. })
        ));
        assert!(matches!(
            resolve_directory(&index, Some("nam"), &["20180322"]),
            Err(NotFoundError::FormatNotListed { .. })
        ));
    }

    #[test]
    fn test_resolve_directory_first_match_in_format_order() {
        // hiresw is indexed first, so it wins even though nam lists the date earlier
        let index = index(&["hiresw.20180321/", "nam.20180322/", "hiresw.20180322/"]);
        assert_eq!(
            resolve_directory(&index, None, &["20180322"]).unwrap(),
            "hiresw.20180322"
        );
        assert!(matches!(
            resolve_directory(&index, None, &["20180323"]),
            Err(NotFoundError::DateNotAvailable { .. })
        ));
    }

    #[test]
    fn test_resolve_directory_falls_back_to_plain_date() {
        let index = index(&["gdas.20180322/", "gfs.2018032218/"]);
        let dates = ["2018032218", "20180322"];
        assert_eq!(
            resolve_directory(&index, Some("gdas"), &dates).unwrap(),
            "gdas.20180322"
        );
        assert_eq!(
            resolve_directory(&index, Some("gfs"), &dates).unwrap(),
            "gfs.2018032218"
        );
        // the qualified date is searched across every format before the plain one
        assert_eq!(
            resolve_directory(&index, None, &dates).unwrap(),
            "gfs.2018032218"
        );
        assert!(matches!(
            resolve_directory(&index, Some("gdas"), &["2018032300", "20180323"]),
            Err(NotFoundError::DateNotListed { date, .. }) if date == "2018032300"
        ));
    }

    #[test]
    fn test_absent_criteria_pass_everything() {
        let all = links(&["a.f001", "b.f002"]);
        assert_eq!(by_product_code(all.clone(), None), all);
        assert_eq!(by_resolution(all.clone(), None), all);
        assert_eq!(by_cycle(all.clone(), None), all);
        assert_eq!(by_forecast_range(all.clone(), None), all);
        assert_eq!(by_product_type(all.clone(), None), all);
    }

    #[test]
    fn test_resolution_filter_can_empty_the_set() {
        let all = links(&["gfs.t18z.pgrb2.0p25.f003", "gfs.t18z.pgrb2.0p50.f003"]);
        assert_eq!(
            names(&by_resolution(all.clone(), Some("0p25"))),
            vec!["gfs.t18z.pgrb2.0p25.f003"]
        );
        assert!(by_resolution(all, Some("1p00")).is_empty());
    }

    #[test]
    fn test_cycle_filter() {
        let all = links(&["gfs.t00z.pgrb2.1p00.f003", "gfs.t18z.pgrb2.1p00.f003"]);
        let cycle = CycleRuntime::parse("18").unwrap();
        assert_eq!(
            names(&by_cycle(all, Some(&cycle))),
            vec!["gfs.t18z.pgrb2.1p00.f003"]
        );
    }

    #[test]
    fn test_forecast_filter_inclusive_bounds() {
        let all = links(&[
            "gfs.t18z.pgrb2.1p00.f002",
            "gfs.t18z.pgrb2.1p00.f003",
            "gfs.t18z.pgrb2.1p00.f004",
            "gfs.t18z.pgrb2.1p00.f005",
            "gfs.t18z.pgrb2.1p00.f006",
            "gfs.t18z.pgrb2.1p00.anl",
        ]);
        let kept = by_forecast_range(all, Some(ForecastRange { start: 3, end: 5 }));
        assert_eq!(
            names(&kept),
            vec![
                "gfs.t18z.pgrb2.1p00.f003",
                "gfs.t18z.pgrb2.1p00.f004",
                "gfs.t18z.pgrb2.1p00.f005",
            ]
        );
    }

    #[test]
    fn test_forecast_filter_keeps_each_link_once() {
        // Names two hours of the range but must only appear once
        let all = links(&["gfs.t18z.f003.f004"]);
        let kept = by_forecast_range(all, Some(ForecastRange { start: 3, end: 5 }));
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_product_type_filter_is_case_sensitive_on_link_text() {
        let all = links(&["gfs.t18z.pgrb2.1p00.f003", "GFS.t18z.pgrb2.1p00.f003"]);
        let kept = by_product_type(all, Some("GFS"));
        assert_eq!(names(&kept), vec!["gfs.t18z.pgrb2.1p00.f003"]);
    }

    #[test]
    fn test_assemble_descriptors() {
        let descriptors = assemble(
            "https://host/gfs/prod/gfs.2018032218",
            &links(&["gfs.t18z.pgrb2.1p00.f003"]),
        );
        assert_eq!(descriptors.len(), 1);
        assert_eq!(
            descriptors[0].download_url,
            "https://host/gfs/prod/gfs.2018032218/gfs.t18z.pgrb2.1p00.f003"
        );
        assert_eq!(descriptors[0].file_format, "f003");
    }
}
