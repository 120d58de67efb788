//! gridrender_engine - Cell coordinates, values and structural edits.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;

    #[test]
    fn test_from_str_single_letter_columns() {
        let a1 = CellRef::from_str("A1").unwrap();
        assert_eq!(a1.row, 0);
        assert_eq!(a1.col, 0);

        let b1 = CellRef::from_str("B1").unwrap();
        assert_eq!(b1.row, 0);
        assert_eq!(b1.col, 1);

        let z1 = CellRef::from_str("Z1").unwrap();
        assert_eq!(z1.row, 0);
        assert_eq!(z1.col, 25);
    }

    #[test]
    fn test_from_str_multi_letter_columns() {
        assert_eq!(CellRef::from_str("AA1").unwrap().col, 26);
        assert_eq!(CellRef::from_str("AB1").unwrap().col, 27);
        assert_eq!(CellRef::from_str("AZ1").unwrap().col, 51);
        assert_eq!(CellRef::from_str("BA1").unwrap().col, 52);
    }

    #[test]
    fn test_from_str_row_numbers() {
        assert_eq!(CellRef::from_str("A1").unwrap().row, 0);
        assert_eq!(CellRef::from_str("A10").unwrap().row, 9);
        assert_eq!(CellRef::from_str("A100").unwrap().row, 99);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let lower = CellRef::from_str("a1").unwrap();
        assert_eq!(lower, CellRef::new(0, 0));

        let mixed = CellRef::from_str("aA1").unwrap();
        assert_eq!(mixed.col, 26);
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("123").is_none());
        assert!(CellRef::from_str("ABC").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("1A").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_display_round_trips_names() {
        for name in ["A1", "C2", "Z99", "AA1", "BZ42"] {
            assert_eq!(CellRef::from_str(name).unwrap().to_string(), name);
        }
    }

    #[test]
    fn test_fromstr_trait_reports_bad_name() {
        let err = "nope".parse::<CellRef>().unwrap_err();
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_structural_edit_fits_current_dimensions() {
        let insert = StructuralEdit::Insert { axis: Axis::Column, at: 4, count: 1 };
        assert!(insert.fits(4));
        assert!(!insert.fits(3));

        let delete = StructuralEdit::Delete { axis: Axis::Row, at: 2, count: 2 };
        assert!(delete.fits(4));
        assert!(!delete.fits(3));

        let mv = StructuralEdit::Move { axis: Axis::Row, from: 0, to: 3 };
        assert!(mv.fits(4));
        assert!(!mv.fits(3));
    }

    #[test]
    fn test_insert_never_grows_past_axis_limit() {
        let huge = StructuralEdit::Insert { axis: Axis::Row, at: 0, count: usize::MAX };
        assert!(!huge.fits(2));

        let to_limit = StructuralEdit::Insert { axis: Axis::Column, at: 0, count: 16_382 };
        assert!(to_limit.fits(2));
        assert!(!to_limit.fits(3));

        let mut lines = vec![1, 2];
        huge.apply_to_vec(&mut lines, || 0);
        assert_eq!(lines, vec![1, 2]);
    }
}
