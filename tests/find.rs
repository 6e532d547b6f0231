use regex_surface::Span;

use crate::engine::{self, Broken};

fn spans(ranges: &[(usize, usize)]) -> Vec<Span> {
    ranges.iter().map(|&(s, e)| Span::from(s..e)).collect()
}

#[test]
fn find() {
    let re = engine::regex(r"\d+");
    assert_eq!(Some(Span::from(1..3)), re.find("a12b2").unwrap());
    assert_eq!(None, re.find("abc").unwrap());
    assert!(re.is_match("a12b2").unwrap());
    assert!(!re.is_match("abc").unwrap());
}

#[test]
fn find_iter() {
    let re = engine::regex(r"\d+");
    let got: Vec<Span> = re.find_iter("a12b2").collect();
    assert_eq!(spans(&[(1, 3), (4, 5)]), got);
}

#[test]
fn find_iter_no_match() {
    let re = engine::regex(r"\d+");
    assert_eq!(0, re.find_iter("abc").count());
}

#[test]
fn find_iter_one_zero_length() {
    let re = engine::regex(r"\d*");
    let got: Vec<Span> = re.find_iter("a1b2").collect();
    assert_eq!(spans(&[(0, 0), (1, 2), (3, 4)]), got);
}

#[test]
fn find_iter_many_zero_length() {
    let re = engine::regex(r"\d*");
    let got: Vec<Span> = re.find_iter("a1bbb2").collect();
    assert_eq!(spans(&[(0, 0), (1, 2), (3, 3), (4, 4), (5, 6)]), got);
}

#[test]
fn find_iter_zero_length_jumps_past_match_location() {
    let re = engine::regex(r"\b");
    let got: Vec<Span> = re.find_iter("test string").collect();
    assert_eq!(spans(&[(0, 0), (4, 4), (5, 5), (11, 11)]), got);
}

#[test]
fn find_iter_zero_length_multibyte() {
    // The forced advance after a suppressed empty match must skip whole
    // characters, not bytes.
    let re = engine::regex(r"\d*");
    let got: Vec<Span> = re.find_iter("\u{2603}7\u{2603}").collect();
    assert_eq!(spans(&[(0, 0), (3, 4), (7, 7)]), got);
}

#[test]
fn find_iter_error_is_terminal() {
    let re = regex_surface::Regex::new(Broken::new(-42));
    let mut it = re.find_iter("abc");
    assert_eq!(None, it.next());
    let err = it.take_error().unwrap();
    assert_eq!(-42, err.code());
    // The error is only reported once.
    assert_eq!(None, it.take_error());
}

#[test]
fn captures() {
    let re = engine::regex("e(l+)|(r+)");
    let caps = re.captures("hello").unwrap().unwrap();
    assert_eq!(3, caps.len());
    assert!(!caps.is_empty());
    assert_eq!(Some(Span::from(1..4)), caps.pos(0));
    assert_eq!(Some(Span::from(2..4)), caps.pos(1));
    assert_eq!(None, caps.pos(2));
    assert_eq!("ell", caps.get(0));
    assert_eq!("ll", caps.get(1));
    assert_eq!("", caps.get(2));
    assert_eq!(vec!["ell", "ll", ""], caps.iter().collect::<Vec<_>>());
}

#[test]
fn captures_no_match() {
    let re = engine::regex(r"\d+");
    assert!(re.captures("abc").unwrap().is_none());
}

#[test]
fn captures_named() {
    let re = engine::regex("hello (?P<name>.*)");
    let caps = re.captures("hello world").unwrap().unwrap();
    assert_eq!("world", caps.get_name("name"));
    assert_eq!(Some(Span::from(6..11)), caps.pos_name("name"));
    assert_eq!("", caps.get_name("nope"));
    assert_eq!(None, caps.pos_name("nope"));
}

#[test]
fn captures_iter() {
    let re = engine::regex(r"(\d)(\d?)");
    let all: Vec<_> = re.captures_iter("a12b2").collect();
    assert_eq!(2, all.len());
    assert_eq!(Some(Span::from(1..3)), all[0].pos(0));
    assert_eq!("1", all[0].get(1));
    assert_eq!("2", all[0].get(2));
    assert_eq!(1, all[0].offset());
    assert_eq!(Some(Span::from(4..5)), all[1].pos(0));
    assert_eq!("2", all[1].get(1));
    assert_eq!("", all[1].get(2));
}

#[test]
fn capture_names() {
    let re = engine::regex("(he)(l+)(o)");
    assert_eq!(
        vec![None, None, None, None],
        re.capture_names().collect::<Vec<_>>(),
    );

    let re = engine::regex("(?P<foo>foo)(?P<bar>bar)");
    assert_eq!(
        vec![None, Some("foo"), Some("bar")],
        re.capture_names().collect::<Vec<_>>(),
    );
    assert_eq!(&[1][..], re.group_info().to_indices("foo"));
    assert_eq!(&[2][..], re.group_info().to_indices("bar"));
}
