use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of the gene-position table. Columns are matched by header name;
/// any other columns in the file are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeneRow {
    pub strand: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub gene_name: String,
    #[serde(default)]
    pub locus_tag: String,
}

pub fn read_genes<R: Read>(reader: R) -> Result<Vec<GeneRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut genes = Vec::new();
    for (i, row) in rdr.deserialize::<GeneRow>().enumerate() {
        // header is line 1
        let row = row.with_context(|| format!("malformed gene table row at line {}", i + 2))?;
        genes.push(row);
    }
    Ok(genes)
}

pub fn read_genes_file(path: &Path) -> Result<Vec<GeneRow>> {
    let reader = super::open_buffered(path, "gene table")?;
    read_genes(reader).with_context(|| format!("cannot parse gene table '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TABLE: &str = "\
gene_id\tlocus_tag\tstrand\tstart\tend\tgene_name
g1\tb0001\t+\t190\t255\tthrL
g2\tb0002\t-\t337\t2799\tthrA
";

    #[test]
    fn reads_named_columns() {
        let genes = read_genes(Cursor::new(TABLE)).unwrap();
        assert_eq!(genes.len(), 2);
        assert_eq!(
            genes[0],
            GeneRow {
                strand: "+".into(),
                start: 190,
                end: 255,
                gene_name: "thrL".into(),
                locus_tag: "b0001".into(),
            }
        );
        assert_eq!(genes[1].strand, "-");
        assert_eq!(genes[1].end, 2799);
    }

    #[test]
    fn non_numeric_coordinate_is_an_error() {
        let bad = "locus_tag\tstrand\tstart\tend\tgene_name\nb1\t+\tabc\t10\tx\n";
        let err = read_genes(Cursor::new(bad)).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }
}
