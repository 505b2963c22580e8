use crate::position::{LineMap, Position};

const DTO: &str = "class A {\n  @Field()\n  x?: string;\n}";

#[test]
fn test_positions_in_dto() {
    let map = LineMap::build(DTO);

    assert_eq!(map.line_count(), 4);
    assert_eq!(map.offset_to_position(0, DTO), Position::new(0, 0));
    assert_eq!(map.offset_to_position(10, DTO), Position::new(1, 0));
    assert_eq!(map.offset_to_position(12, DTO), Position::new(1, 2));
    assert_eq!(map.offset_to_position(DTO.len() as u32, DTO), Position::new(3, 1));
    let range = map.range_of(12, 20, DTO);
    assert_eq!(range.start, Position::new(1, 2));
    assert_eq!(range.end, Position::new(1, 10));
}

#[test]
fn test_crlf_and_lone_cr() {
    let source = "a\r\nb\rc\n";
    let map = LineMap::build(source);

    assert_eq!(map.line_count(), 4);
    assert_eq!(map.line_start(1), Some(3));
    assert_eq!(map.line_start(2), Some(5));
    assert_eq!(map.line_text(0, source), Some("a"));
    assert_eq!(map.line_text(1, source), Some("b"));
    assert_eq!(map.line_text(3, source), Some(""));
    assert_eq!(map.offset_to_position(5, source), Position::new(2, 0));
}

#[test]
fn test_every_offset_maps_back() {
    let map = LineMap::build(DTO);
    for offset in 0..=DTO.len() as u32 {
        let position = map.offset_to_position(offset, DTO);
        assert_eq!(
            map.position_to_offset(position, DTO),
            Some(offset),
            "offset {offset}"
        );
    }
}

#[test]
fn test_utf16_columns() {
    // U+1F680 is four bytes and two UTF-16 units
    let source = "@ApiProperty({ example: '\u{1F680}' }) x: string;";
    let map = LineMap::build(source);
    let after = source.find("' }").expect("quote") as u32;

    assert_eq!(map.offset_to_position(after, source).character, after - 2);
    assert_eq!(
        map.position_to_offset(Position::new(0, after - 2), source),
        Some(after)
    );
}

#[test]
fn test_out_of_range_lines() {
    let map = LineMap::build(DTO);
    assert_eq!(map.position_to_offset(Position::new(9, 0), DTO), None);
    assert_eq!(map.position_to_offset(Position::new(1, 99), DTO), Some(20));
    assert_eq!(map.line_text(4, DTO), None);
    assert_eq!(map.line_of(u32::MAX), 3);
}
