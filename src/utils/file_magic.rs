/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// 作业提交只收 PDF，其余格式留作上传白名单扩展的余地。
///
/// # Arguments
/// * `data` - 文件内容的前几个字节
/// * `extension` - 文件扩展名（包含点号，如 ".pdf"）
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match extension.to_lowercase().as_str() {
        // 文档格式
        ".pdf" => data.starts_with(b"%PDF"),
        ".doc" => {
            // MS Office 旧格式 (OLE Compound Document)
            data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        }
        ".docx" => {
            // MS Office 新格式 (ZIP-based OOXML)
            data.starts_with(&[0x50, 0x4B, 0x03, 0x04])
        }

        // 压缩格式
        ".zip" => data.starts_with(&[0x50, 0x4B, 0x03, 0x04]),

        // 文本格式 - 不检查魔术字节
        ".txt" | ".md" => true,

        // 未知格式 - 默认拒绝
        _ => false,
    }
}

/// 从原始文件名提取扩展名（含点号，统一小写）
pub fn extract_extension(filename: &str) -> Option<String> {
    filename
        .rfind('.')
        .filter(|&idx| idx > 0 && idx + 1 < filename.len())
        .map(|idx| filename[idx..].to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_magic() {
        let pdf_header = b"%PDF-1.4";
        assert!(validate_magic_bytes(pdf_header, ".pdf"));
        assert!(validate_magic_bytes(pdf_header, ".PDF"));
        assert!(!validate_magic_bytes(pdf_header, ".doc"));
    }

    #[test]
    fn test_non_pdf_content_rejected() {
        let zip_header = [0x50, 0x4B, 0x03, 0x04];
        assert!(!validate_magic_bytes(&zip_header, ".pdf"));
        assert!(validate_magic_bytes(&zip_header, ".zip"));
    }

    #[test]
    fn test_empty_data() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(&[], ".txt"));
    }

    #[test]
    fn test_unknown_extension() {
        let data = [0x00, 0x01, 0x02, 0x03];
        assert!(!validate_magic_bytes(&data, ".exe"));
        assert!(!validate_magic_bytes(&data, ".unknown"));
    }

    #[test]
    fn test_extract_extension() {
        assert_eq!(extract_extension("report.PDF"), Some(".pdf".to_string()));
        assert_eq!(
            extract_extension("archive.tar.gz"),
            Some(".gz".to_string())
        );
        assert_eq!(extract_extension("noext"), None);
        assert_eq!(extract_extension(".hidden"), None);
    }
}
