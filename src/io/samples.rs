use anyhow::Result;
use std::io::BufRead;
use std::path::Path;

/// 读取样本列表：每行一个样本 ID，保持文件中的顺序；空行忽略。
pub fn read_sample_list<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let id = line.trim_end();
        if id.is_empty() {
            continue;
        }
        out.push(id.to_string());
    }
    Ok(out)
}

pub fn read_sample_file(path: &Path) -> Result<Vec<String>> {
    let reader = super::open_buffered(path, "sample list")?;
    read_sample_list(reader)
}
