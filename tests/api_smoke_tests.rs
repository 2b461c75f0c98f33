use viewer_rs::backend::NullBackend;
use viewer_rs::core::{Point, SourceDescriptor, SourceDimensions};
use viewer_rs::events::EventKind;
use viewer_rs::{Viewer, ViewerConfig};

use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn viewer_smoke_flow() {
    let mut viewer =
        Viewer::new(NullBackend::default(), ViewerConfig::default(), 0.0).expect("viewer init");
    assert!(!viewer.is_open());

    let opens = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&opens);
    viewer.add_handler(EventKind::Open, move |_| *sink.borrow_mut() += 1);

    viewer.open(
        SourceDescriptor::new(SourceDimensions::new(4096, 4096)),
        0.0,
    );
    assert!(viewer.is_open());
    assert_eq!(*opens.borrow(), 1);
    assert_eq!(
        viewer.source().expect("open").dimensions,
        SourceDimensions::new(4096, 4096)
    );

    // First tick consumes the forced redraw from open.
    viewer.pump(20.0);
    assert_eq!(viewer.drawer().expect("open").update_calls, 1);
    assert_eq!(viewer.profiler().expect("open").begin_calls, 1);
    assert_eq!(viewer.profiler().expect("open").end_calls, 1);

    viewer.pointer_click(Point::new(100.0, 120.0), true, false);
    viewer.pointer_scroll(Point::new(100.0, 120.0), 1);
    assert_eq!(viewer.viewport().expect("open").zoom_calls.len(), 2);

    viewer.close();
    assert!(!viewer.is_open());
    assert!(viewer.viewport().is_none());
    assert!(viewer.drawer().is_none());

    viewer.open_deferred(
        SourceDescriptor::new(SourceDimensions::new(1024, 768)),
        100.0,
    );
    assert!(!viewer.is_open());
    viewer.pump(102.0);
    assert!(viewer.is_open());
    assert_eq!(*opens.borrow(), 2);

    viewer.set_visible(false);
    assert!(!viewer.is_visible());
    viewer.set_visible(true);
    assert!(viewer.is_visible());
}

#[test]
fn construction_rejects_empty_container() {
    let backend = NullBackend {
        container: viewer_rs::core::ContainerSize::new(0, 0),
        ..NullBackend::default()
    };
    let result = Viewer::new(backend, ViewerConfig::default(), 0.0);
    assert!(matches!(
        result,
        Err(viewer_rs::ViewerError::InvalidContainer { .. })
    ));
}

#[test]
fn configured_descriptor_opens_after_construction() {
    let backend = NullBackend {
        resolved: Some(SourceDescriptor::new(SourceDimensions::new(640, 480))),
        ..NullBackend::default()
    };
    let config = ViewerConfig::default().with_descriptor(
        viewer_rs::core::DescriptorReference::Url("https://tiles.example/image.dzi".to_owned()),
    );
    let mut viewer = Viewer::new(backend, config, 0.0).expect("viewer init");
    assert!(!viewer.is_open());

    viewer.pump(2.0);
    assert!(viewer.is_open());
    assert_eq!(
        viewer.source().expect("open").dimensions,
        SourceDimensions::new(640, 480)
    );
}
