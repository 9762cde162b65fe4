//! User-facing strings of the desktop viewer. Korean throughout, like the
//! survey's own labels.

pub const WINDOW_TITLE: &str = "경제활동인구조사 (월별 통계)";
pub const HEADING: &str = "경제활동인구조사";
pub const SUBHEADING: &str = "월별 통계";

pub const ITEM: &str = "항목";
pub const SEX: &str = "성별";
pub const AGE: &str = "연령";
pub const YEAR: &str = "연도";

pub const FILE_MENU: &str = "파일";
pub const OPEN: &str = "열기…";
pub const OPEN_DIALOG_TITLE: &str = "조사 자료 열기";
pub const SUPPORTED_FILES: &str = "지원 형식";

pub const NO_DATASET: &str = "불러온 자료가 없습니다.";
pub const OPEN_HINT: &str = "조사 자료를 여세요  (파일 → 열기…)";
pub const LAST_YEAR_REQUIRED: &str = "연도를 하나 이상 선택해야 합니다.";
pub const ERROR_PREFIX: &str = "오류";

/// Year caption with the selected and available counts.
pub fn year_caption(selected: usize, available: usize) -> String {
    format!("{YEAR}  ({selected}/{available})")
}

/// Toolbar summary of the loaded table and the current chart.
pub fn load_summary(observations: usize, plotted: usize) -> String {
    format!("관측치 {observations}개, 표시 {plotted}개")
}

pub fn load_error(err: &anyhow::Error) -> String {
    format!("{ERROR_PREFIX}: {err:#}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_hangul(text: &str) -> bool {
        text.chars().any(|c| ('\u{AC00}'..='\u{D7A3}').contains(&c))
    }

    #[test]
    fn every_caption_is_korean() {
        let fixed = [
            WINDOW_TITLE,
            HEADING,
            SUBHEADING,
            ITEM,
            SEX,
            AGE,
            YEAR,
            FILE_MENU,
            OPEN,
            OPEN_DIALOG_TITLE,
            SUPPORTED_FILES,
            NO_DATASET,
            OPEN_HINT,
            LAST_YEAR_REQUIRED,
            ERROR_PREFIX,
        ];
        for text in fixed {
            assert!(has_hangul(text), "{text:?} has no Hangul");
        }
        assert!(has_hangul(&year_caption(2, 4)));
        assert!(has_hangul(&load_summary(10, 3)));
    }

    #[test]
    fn formatted_captions_carry_their_counts() {
        assert_eq!(year_caption(2, 4), "연도  (2/4)");
        assert_eq!(load_summary(1344, 24), "관측치 1344개, 표시 24개");
        assert_eq!(
            load_error(&anyhow::anyhow!("missing required column 'DT'")),
            "오류: missing required column 'DT'"
        );
    }
}
