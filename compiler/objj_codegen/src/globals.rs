//! Predefined global identifiers.
//!
//! Names provided by the language standard, browser and server hosts, and
//! the Objective-J runtime. Used only as a lookup by the identifier
//! resolver and the shadowing check.

use rustc_hash::FxHashMap;

/// How a predefined global may be used.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct GlobalAccess {
    /// Assigning to the global is legitimate.
    pub writable: bool,
    /// A local declaration with the same name does not warn.
    pub ignore_shadow: bool,
}

impl GlobalAccess {
    pub const READ_ONLY: GlobalAccess = GlobalAccess {
        writable: false,
        ignore_shadow: false,
    };
    pub const WRITABLE: GlobalAccess = GlobalAccess {
        writable: true,
        ignore_shadow: false,
    };
    pub const SHADOWABLE: GlobalAccess = GlobalAccess {
        writable: false,
        ignore_shadow: true,
    };
}

/// Names that should never be used as variable names.
pub fn is_reserved(name: &str) -> bool {
    matches!(
        name,
        "arguments" | "NaN" | "break" | "continue" | "delete" | "do" | "new" | "undefined"
    )
}

/// Look up a name in the built-in table.
pub fn builtin(name: &str) -> Option<GlobalAccess> {
    Some(match name {
        "Buffer" | "clearImmediate" | "clearInterval" | "clearTimeout" | "console" | "exports" |
        "onbeforeunload" | "onblur" | "onerror" | "onfocus" | "onload" | "onresize" |
        "onunload" | "process" | "setImmediate" | "setInterval" | "setTimeout" => GlobalAccess::WRITABLE,
        "blur" | "closed" | "document" | "history" | "length" | "location" | "name" | "parent" |
        "status" | "top" => GlobalAccess::SHADOWABLE,
        "Array" | "Audio" | "Blob" | "Boolean" | "CanvasGradient" | "CanvasPattern" |
        "CanvasRenderingContext2D" | "CustomEvent" | "DOMParser" | "Date" | "Debug" |
        "Element" | "ElementTimeControl" | "Error" | "EvalError" | "Event" | "FileReader" |
        "FormData" | "Function" | "GLOBAL" | "HTMLAnchorElement" | "HTMLBRElement" |
        "HTMLBaseElement" | "HTMLBlockquoteElement" | "HTMLBodyElement" | "HTMLButtonElement" |
        "HTMLCanvasElement" | "HTMLDListElement" | "HTMLDirectoryElement" | "HTMLDivElement" |
        "HTMLElement" | "HTMLFieldSetElement" | "HTMLFontElement" | "HTMLFormElement" |
        "HTMLFrameElement" | "HTMLFrameSetElement" | "HTMLHRElement" | "HTMLHeadElement" |
        "HTMLHeadingElement" | "HTMLHtmlElement" | "HTMLIFrameElement" | "HTMLImageElement" |
        "HTMLInputElement" | "HTMLIsIndexElement" | "HTMLLIElement" | "HTMLLabelElement" |
        "HTMLLayerElement" | "HTMLLegendElement" | "HTMLLinkElement" | "HTMLMapElement" |
        "HTMLMenuElement" | "HTMLMetaElement" | "HTMLModElement" | "HTMLOListElement" |
        "HTMLObjectElement" | "HTMLOptGroupElement" | "HTMLOptionElement" |
        "HTMLParagraphElement" | "HTMLParamElement" | "HTMLPreElement" | "HTMLQuoteElement" |
        "HTMLScriptElement" | "HTMLSelectElement" | "HTMLStyleElement" |
        "HTMLTableCaptionElement" | "HTMLTableCellElement" | "HTMLTableColElement" |
        "HTMLTableElement" | "HTMLTableRowElement" | "HTMLTableSectionElement" |
        "HTMLTextAreaElement" | "HTMLTitleElement" | "HTMLUListElement" | "HTMLVideoElement" |
        "Image" | "Infinity" | "JSON" | "Map" | "Math" | "MessageChannel" | "MessageEvent" |
        "MessagePort" | "MouseEvent" | "MutationObserver" | "NO" | "NULL" | "Nil" | "Node" |
        "NodeFilter" | "NodeList" | "Number" | "Object" | "Option" | "Promise" | "Proxy" |
        "RangeError" | "ReferenceError" | "RegExp" | "SVGAElement" | "SVGAltGlyphDefElement" |
        "SVGAltGlyphElement" | "SVGAltGlyphItemElement" | "SVGAngle" |
        "SVGAnimateColorElement" | "SVGAnimateElement" | "SVGAnimateMotionElement" |
        "SVGAnimateTransformElement" | "SVGAnimatedAngle" | "SVGAnimatedBoolean" |
        "SVGAnimatedEnumeration" | "SVGAnimatedInteger" | "SVGAnimatedLength" |
        "SVGAnimatedLengthList" | "SVGAnimatedNumber" | "SVGAnimatedNumberList" |
        "SVGAnimatedPathData" | "SVGAnimatedPoints" | "SVGAnimatedPreserveAspectRatio" |
        "SVGAnimatedRect" | "SVGAnimatedString" | "SVGAnimatedTransformList" |
        "SVGAnimationElement" | "SVGCSSRule" | "SVGCircleElement" | "SVGClipPathElement" |
        "SVGColor" | "SVGColorProfileElement" | "SVGColorProfileRule" |
        "SVGComponentTransferFunctionElement" | "SVGCursorElement" | "SVGDefsElement" |
        "SVGDescElement" | "SVGDocument" | "SVGElement" | "SVGElementInstance" |
        "SVGElementInstanceList" | "SVGEllipseElement" | "SVGExternalResourcesRequired" |
        "SVGFEBlendElement" | "SVGFEColorMatrixElement" | "SVGFEComponentTransferElement" |
        "SVGFECompositeElement" | "SVGFEConvolveMatrixElement" | "SVGFEDiffuseLightingElement" |
        "SVGFEDisplacementMapElement" | "SVGFEDistantLightElement" | "SVGFEFloodElement" |
        "SVGFEFuncAElement" | "SVGFEFuncBElement" | "SVGFEFuncGElement" | "SVGFEFuncRElement" |
        "SVGFEGaussianBlurElement" | "SVGFEImageElement" | "SVGFEMergeElement" |
        "SVGFEMergeNodeElement" | "SVGFEMorphologyElement" | "SVGFEOffsetElement" |
        "SVGFEPointLightElement" | "SVGFESpecularLightingElement" | "SVGFESpotLightElement" |
        "SVGFETileElement" | "SVGFETurbulenceElement" | "SVGFilterElement" |
        "SVGFilterPrimitiveStandardAttributes" | "SVGFitToViewBox" | "SVGFontElement" |
        "SVGFontFaceElement" | "SVGFontFaceFormatElement" | "SVGFontFaceNameElement" |
        "SVGFontFaceSrcElement" | "SVGFontFaceUriElement" | "SVGForeignObjectElement" |
        "SVGGElement" | "SVGGlyphElement" | "SVGGlyphRefElement" | "SVGGradientElement" |
        "SVGHKernElement" | "SVGICCColor" | "SVGImageElement" | "SVGLangSpace" | "SVGLength" |
        "SVGLengthList" | "SVGLineElement" | "SVGLinearGradientElement" | "SVGLocatable" |
        "SVGMPathElement" | "SVGMarkerElement" | "SVGMaskElement" | "SVGMatrix" |
        "SVGMetadataElement" | "SVGMissingGlyphElement" | "SVGNumber" | "SVGNumberList" |
        "SVGPaint" | "SVGPathElement" | "SVGPathSeg" | "SVGPathSegArcAbs" | "SVGPathSegArcRel" |
        "SVGPathSegClosePath" | "SVGPathSegCurvetoCubicAbs" | "SVGPathSegCurvetoCubicRel" |
        "SVGPathSegCurvetoCubicSmoothAbs" | "SVGPathSegCurvetoCubicSmoothRel" |
        "SVGPathSegCurvetoQuadraticAbs" | "SVGPathSegCurvetoQuadraticRel" |
        "SVGPathSegCurvetoQuadraticSmoothAbs" | "SVGPathSegCurvetoQuadraticSmoothRel" |
        "SVGPathSegLinetoAbs" | "SVGPathSegLinetoHorizontalAbs" |
        "SVGPathSegLinetoHorizontalRel" | "SVGPathSegLinetoRel" |
        "SVGPathSegLinetoVerticalAbs" | "SVGPathSegLinetoVerticalRel" | "SVGPathSegList" |
        "SVGPathSegMovetoAbs" | "SVGPathSegMovetoRel" | "SVGPatternElement" | "SVGPoint" |
        "SVGPointList" | "SVGPolygonElement" | "SVGPolylineElement" | "SVGPreserveAspectRatio" |
        "SVGRadialGradientElement" | "SVGRect" | "SVGRectElement" | "SVGRenderingIntent" |
        "SVGSVGElement" | "SVGScriptElement" | "SVGSetElement" | "SVGStopElement" |
        "SVGStringList" | "SVGStylable" | "SVGStyleElement" | "SVGSwitchElement" |
        "SVGSymbolElement" | "SVGTRefElement" | "SVGTSpanElement" | "SVGTests" |
        "SVGTextContentElement" | "SVGTextElement" | "SVGTextPathElement" |
        "SVGTextPositioningElement" | "SVGTitleElement" | "SVGTransform" | "SVGTransformList" |
        "SVGTransformable" | "SVGURIReference" | "SVGUnitTypes" | "SVGUseElement" |
        "SVGVKernElement" | "SVGViewElement" | "SVGViewSpec" | "SVGZoomAndPan" | "Set" |
        "SharedWorker" | "String" | "SyntaxError" | "TimeEvent" | "TypeError" | "URIError" |
        "URL" | "WeakMap" | "WeakSet" | "WebSocket" | "Worker" | "XMLHttpRequest" |
        "XMLSerializer" | "XPathEvaluator" | "XPathException" | "XPathExpression" |
        "XPathNSResolver" | "XPathNamespace" | "XPathResult" | "YES" | "__dirname" |
        "__filename" | "_cmd" | "addEventListener" | "alert" | "applicationCache" | "atob" |
        "btoa" | "cancelAnimationFrame" | "close" | "confirm" | "debugger" | "decodeURI" |
        "decodeURIComponent" | "defaultStatus" | "encodeURI" | "encodeURIComponent" | "escape" |
        "eval" | "event" | "focus" | "frames" | "getComputedStyle" | "global" |
        "hasOwnProperty" | "isFinite" | "isNaN" | "localStorage" | "matchMedia" | "module" |
        "moveBy" | "moveTo" | "navigator" | "nil" | "open" | "openDatabase" | "opener" |
        "opera" | "parseFloat" | "parseInt" | "print" | "prompt" | "removeEventListener" |
        "requestAnimationFrame" | "require" | "resizeBy" | "resizeTo" | "root" | "screen" |
        "scroll" | "scrollBy" | "scrollTo" | "self" | "sessionStorage" | "unescape" | "window" => GlobalAccess::READ_ONLY,
        _ => return None,
    })
}

/// The built-in table layered with caller-supplied globals.
#[derive(Clone, Debug, Default)]
pub struct PredefinedGlobals {
    extra: FxHashMap<String, GlobalAccess>,
}

impl PredefinedGlobals {
    pub fn new(extra: &[(String, GlobalAccess)]) -> Self {
        PredefinedGlobals {
            extra: extra.iter().cloned().collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<GlobalAccess> {
        self.extra.get(name).copied().or_else(|| builtin(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}
