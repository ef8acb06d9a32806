use super::*;

#[test]
fn power_label_offers_the_opposite_state() {
    assert_eq!(power_label(true), "Turn Off");
    assert_eq!(power_label(false), "Turn On");
}

#[test]
fn slider_value_reads_each_field() {
    let panel = Panel { power: true, red: 10, green: 20, blue: 30, brightness: 40 };
    assert_eq!(slider_value(&panel, "red"), 10);
    assert_eq!(slider_value(&panel, "green"), 20);
    assert_eq!(slider_value(&panel, "blue"), 30);
    assert_eq!(slider_value(&panel, "brightness"), 40);
}

#[test]
fn slider_label_capitalizes() {
    assert_eq!(slider_label("brightness"), "Brightness");
    assert_eq!(slider_label(""), "");
}
